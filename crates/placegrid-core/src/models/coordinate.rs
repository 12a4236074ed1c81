//! WGS84 coordinates and bounding boxes.

use serde::{Deserialize, Serialize};

use crate::error::{PlacegridError, Result};

/// Meters per degree of latitude (WGS84 mean).
///
/// Longitude degrees shrink with latitude; the planner deliberately uses the
/// same constant for both axes so that spacing, circle radii, and residual
/// accounting all live in one consistent degree-space model.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A (latitude, longitude) pair in degrees, WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, validating the WGS84 range.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PlacegridError::CoordinateOutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Bit-exact key for hashing and exact-duplicate detection.
    pub fn bits(self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

/// Convert a distance in meters to degrees using the fixed constant.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Axis-aligned bounding box over coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(24.8607, 67.0011).unwrap();
        assert_eq!(c.lat, 24.8607);
        assert_eq!(c.lon, 67.0011);
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-90.5, 0.0).is_err());
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_to_point_axis_order() {
        // geo points are (x=lon, y=lat)
        let c = Coordinate::new(24.0, 67.0).unwrap();
        let p = c.to_point();
        assert_eq!(p.x(), 67.0);
        assert_eq!(p.y(), 24.0);
    }

    #[test]
    fn test_meters_to_degrees() {
        let deg = meters_to_degrees(111_320.0);
        assert!((deg - 1.0).abs() < 1e-12);
    }
}
