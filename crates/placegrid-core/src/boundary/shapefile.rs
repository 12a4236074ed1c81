//! ESRI Shapefile boundary reader.
//!
//! Shapefiles consist of multiple component files (.shp, .shx, .dbf, .prj)
//! that must all be present for proper reading. All polygon features are
//! merged into a single boundary geometry, matching how the downstream
//! planner treats the region as one area of interest.

use std::fs;
use std::path::Path;

use geo::algorithm::contains::Contains;
use geo::{Coord, LineString, MultiPolygon, Polygon, UnaryUnion};
use shapefile::{PolygonRing, Reader as ShapefileReader, Shape};

use super::{validation, BoundaryReader, RegionBoundary};
use crate::error::{PlacegridError, Result};

/// Shapefile boundary reader.
pub struct ShapefileBoundaryReader;

impl BoundaryReader for ShapefileBoundaryReader {
    fn read(&self, path: &Path) -> Result<RegionBoundary> {
        validation::require_component_files(path, &["shx", "dbf"])?;
        check_crs(path)?;

        let mut reader = ShapefileReader::from_path(path).map_err(|e| {
            PlacegridError::BoundaryFormat {
                format: "Shapefile".to_string(),
                message: format!("failed to open: {e}"),
            }
        })?;

        let mut polygons: Vec<Polygon<f64>> = Vec::new();
        for shape_record in reader.iter_shapes_and_records() {
            let (shape, _record) = shape_record.map_err(|e| PlacegridError::BoundaryFormat {
                format: "Shapefile".to_string(),
                message: format!("failed to read feature: {e}"),
            })?;
            match shape {
                Shape::Polygon(polygon) => polygons.extend(to_geo_polygons(&polygon)),
                Shape::NullShape => {}
                other => {
                    tracing::warn!(
                        shape_type = %other.shapetype(),
                        "skipping non-polygon feature in boundary"
                    );
                }
            }
        }

        if polygons.is_empty() {
            return Err(PlacegridError::EmptyBoundary { path: path.to_path_buf() });
        }

        // Overlapping features collapse into one geometry, so containment and
        // area accounting see a single region.
        let merged: MultiPolygon<f64> = polygons.iter().unary_union();
        RegionBoundary::new(merged)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["shp"]
    }

    fn format_name(&self) -> &str {
        "Shapefile"
    }
}

/// Convert a shapefile polygon (possibly multi-ring) into geo polygons,
/// attaching each inner ring to the outer ring that encloses it.
fn to_geo_polygons(polygon: &shapefile::Polygon) -> Vec<Polygon<f64>> {
    let mut outers: Vec<Polygon<f64>> = Vec::new();
    let mut inners: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        let coords: Vec<Coord<f64>> =
            ring.points().iter().map(|p| Coord { x: p.x, y: p.y }).collect();
        match ring {
            PolygonRing::Outer(_) => outers.push(Polygon::new(LineString::from(coords), vec![])),
            PolygonRing::Inner(_) => inners.push(LineString::from(coords)),
        }
    }

    for inner in inners {
        let Some(first) = inner.0.first().copied() else {
            continue;
        };
        if let Some(owner) = outers.iter_mut().find(|outer| outer.contains(&first)) {
            owner.interiors_push(inner);
        }
    }

    outers
}

/// Reject boundaries whose `.prj` sidecar declares anything other than WGS84.
///
/// Normalization is the supplier's job; an un-normalized boundary is a fatal
/// configuration error rather than something to silently reproject.
fn check_crs(path: &Path) -> Result<()> {
    let Some(prj_path) = validation::sidecar(path, "prj") else {
        tracing::warn!(path = %path.display(), "no .prj sidecar; assuming WGS84");
        return Ok(());
    };

    let wkt = fs::read_to_string(&prj_path)?;
    let is_wgs84 = ["WGS_1984", "WGS 84", "WGS84", "4326"]
        .iter()
        .any(|marker| wkt.contains(marker));
    if is_wgs84 {
        Ok(())
    } else {
        let found = wkt.split(['"', ',']).nth(1).unwrap_or("unknown CRS").to_string();
        Err(PlacegridError::CrsMismatch { found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_components_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("region.shp");
        fs::write(&shp, b"").unwrap();

        let err = ShapefileBoundaryReader.read(&shp).unwrap_err();
        assert!(matches!(err, PlacegridError::BoundaryFormat { .. }));
    }

    #[test]
    fn test_non_wgs84_prj_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("region.shp");
        for ext in ["shp", "shx", "dbf"] {
            fs::write(dir.path().join(format!("region.{ext}")), b"").unwrap();
        }
        fs::write(
            dir.path().join("region.prj"),
            r#"PROJCS["UTM_Zone_42N",GEOGCS["GCS_Clarke_1880",DATUM["D_Clarke_1880"]]]"#,
        )
        .unwrap();

        let err = ShapefileBoundaryReader.read(&shp).unwrap_err();
        assert!(matches!(err, PlacegridError::CrsMismatch { .. }));
    }

    #[test]
    fn test_wgs84_prj_accepted_by_crs_check() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("region.shp");
        fs::write(&shp, b"").unwrap();
        fs::write(
            dir.path().join("region.prj"),
            r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984"],PRIMEM["Greenwich",0.0]]"#,
        )
        .unwrap();

        assert!(check_crs(&shp).is_ok());
    }

    #[test]
    fn test_inner_ring_attaches_to_enclosing_outer() {
        use shapefile::Point;
        let polygon = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
            ]),
            PolygonRing::Inner(vec![
                Point::new(4.0, 4.0),
                Point::new(6.0, 4.0),
                Point::new(6.0, 6.0),
                Point::new(4.0, 6.0),
                Point::new(4.0, 4.0),
            ]),
        ]);

        let polys = to_geo_polygons(&polygon);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].interiors().len(), 1);
    }
}
