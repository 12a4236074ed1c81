//! Region boundary: the geographic area of interest.
//!
//! A [`RegionBoundary`] wraps a simple or multi-part polygon and exposes the
//! containment and bounding-box queries the coverage planner needs. Readers
//! for the supported vector formats live in submodules; all coordinates must
//! already be WGS84 (EPSG:4326); readers fail on anything else rather than
//! reprojecting.

pub mod geojson;
pub mod shapefile;
pub(crate) mod validation;

use std::path::Path;

use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::contains::Contains;
use geo::Area;
use geo::MultiPolygon;

use crate::error::{PlacegridError, Result};
use crate::models::{BoundingBox, Coordinate};

pub use geojson::GeoJsonBoundaryReader;
pub use shapefile::ShapefileBoundaryReader;

/// Immutable region boundary, shared read-only by all components of a run.
#[derive(Debug, Clone)]
pub struct RegionBoundary {
    geometry: MultiPolygon<f64>,
    bbox: BoundingBox,
    area_sq_deg: f64,
}

impl RegionBoundary {
    /// Wrap a multi-polygon, rejecting empty or zero-area geometry.
    ///
    /// An unusable boundary is a configuration error surfaced before any
    /// search point is generated.
    pub fn new(geometry: MultiPolygon<f64>) -> Result<Self> {
        let area_sq_deg = geometry.unsigned_area();
        if geometry.0.is_empty() || area_sq_deg == 0.0 {
            return Err(PlacegridError::ZeroAreaBoundary);
        }
        let rect = geometry.bounding_rect().ok_or(PlacegridError::ZeroAreaBoundary)?;
        let bbox = BoundingBox {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lon: rect.min().x,
            max_lon: rect.max().x,
        };
        Ok(Self { geometry, bbox, area_sq_deg })
    }

    /// Point-in-polygon test against the full multi-polygon (holes included).
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.geometry.contains(&coordinate.to_point())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Area in square degrees, used for coverage-ratio accounting.
    pub fn area_sq_deg(&self) -> f64 {
        self.area_sq_deg
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

/// Boundary reader trait that all format implementations must implement.
pub trait BoundaryReader {
    /// Read a region boundary from the given path.
    fn read(&self, path: &Path) -> Result<RegionBoundary>;

    /// Supported file extensions (e.g. ["shp"]).
    fn supported_extensions(&self) -> &[&str];

    /// Human-readable format name (e.g. "Shapefile", "GeoJSON").
    fn format_name(&self) -> &str;
}

/// Load a boundary, dispatching on the file extension.
pub fn load_boundary(path: &Path) -> Result<RegionBoundary> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "shp" => ShapefileBoundaryReader.read(path),
        "geojson" | "json" => GeoJsonBoundaryReader.read(path),
        _ => Err(PlacegridError::UnsupportedFormat { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn square(min: f64, max: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(min, min), (max, min), (max, max), (min, max), (min, min)]),
            vec![],
        )
    }

    #[test]
    fn test_contains_and_bbox() {
        let boundary = RegionBoundary::new(MultiPolygon(vec![square(0.0, 10.0)])).unwrap();

        assert!(boundary.contains(&Coordinate::new(5.0, 5.0).unwrap()));
        assert!(!boundary.contains(&Coordinate::new(15.0, 15.0).unwrap()));

        let bbox = boundary.bounding_box();
        assert_eq!(bbox.min_lat, 0.0);
        assert_eq!(bbox.max_lat, 10.0);
        assert_eq!(bbox.min_lon, 0.0);
        assert_eq!(bbox.max_lon, 10.0);
    }

    #[test]
    fn test_multi_part_containment() {
        let boundary = RegionBoundary::new(MultiPolygon(vec![
            square(0.0, 1.0),
            square(5.0, 6.0),
        ]))
        .unwrap();

        assert!(boundary.contains(&Coordinate::new(0.5, 0.5).unwrap()));
        assert!(boundary.contains(&Coordinate::new(5.5, 5.5).unwrap()));
        // between the two parts
        assert!(!boundary.contains(&Coordinate::new(3.0, 3.0).unwrap()));
    }

    #[test]
    fn test_empty_boundary_rejected() {
        let err = RegionBoundary::new(MultiPolygon(vec![])).unwrap_err();
        assert!(matches!(err, PlacegridError::ZeroAreaBoundary));
    }

    #[test]
    fn test_zero_area_boundary_rejected() {
        // degenerate polygon: all vertices collinear
        let degenerate = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]),
            vec![],
        );
        let err = RegionBoundary::new(MultiPolygon(vec![degenerate])).unwrap_err();
        assert!(matches!(err, PlacegridError::ZeroAreaBoundary));
    }

    #[test]
    fn test_unsupported_format() {
        let err = load_boundary(Path::new("region.gpkg")).unwrap_err();
        assert!(matches!(err, PlacegridError::UnsupportedFormat { .. }));
    }
}
