//! Circle approximation of one query's search footprint.

use geo::{Coord, LineString, Polygon};

use crate::models::{meters_to_degrees, Coordinate};

/// The search footprint of one query point at a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageCircle {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl CoverageCircle {
    pub fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Approximate the disc as a regular N-gon in degree space.
    ///
    /// The N-gon under-covers the true disc by `radius * (1 - cos(PI/N))`;
    /// the vertex count must stay fixed across a run for numerical
    /// consistency between planning and validation.
    pub fn to_polygon(&self, vertices: u32) -> Polygon<f64> {
        let radius_deg = meters_to_degrees(self.radius_m);
        let coords: Vec<Coord<f64>> = (0..vertices)
            .map(|i| {
                let theta = std::f64::consts::TAU * f64::from(i) / f64::from(vertices);
                Coord {
                    x: self.center.lon + radius_deg * theta.cos(),
                    y: self.center.lat + radius_deg * theta.sin(),
                }
            })
            .collect();
        Polygon::new(LineString::from(coords), vec![])
    }
}
