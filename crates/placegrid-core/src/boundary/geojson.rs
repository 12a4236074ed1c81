//! GeoJSON boundary reader.
//!
//! Accepts a Feature, FeatureCollection, or bare Geometry and collects every
//! Polygon/MultiPolygon member. GeoJSON coordinates are WGS84 by RFC 7946,
//! so no CRS check is needed here.

use std::fs;
use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon, UnaryUnion};
use geojson::{GeoJson, Geometry, Value};

use super::{BoundaryReader, RegionBoundary};
use crate::error::{PlacegridError, Result};

/// GeoJSON boundary reader.
pub struct GeoJsonBoundaryReader;

impl BoundaryReader for GeoJsonBoundaryReader {
    fn read(&self, path: &Path) -> Result<RegionBoundary> {
        let content = fs::read_to_string(path)?;
        let geojson: GeoJson = content.parse().map_err(|e| PlacegridError::BoundaryFormat {
            format: "GeoJSON".to_string(),
            message: format!("parse error: {e}"),
        })?;

        let mut polygons: Vec<Polygon<f64>> = Vec::new();
        match &geojson {
            GeoJson::Geometry(geometry) => collect_polygons(geometry, &mut polygons),
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    collect_polygons(geometry, &mut polygons);
                }
            }
            GeoJson::FeatureCollection(collection) => {
                for feature in &collection.features {
                    if let Some(geometry) = &feature.geometry {
                        collect_polygons(geometry, &mut polygons);
                    }
                }
            }
        }

        if polygons.is_empty() {
            return Err(PlacegridError::EmptyBoundary { path: path.to_path_buf() });
        }

        let merged: MultiPolygon<f64> = polygons.iter().unary_union();
        RegionBoundary::new(merged)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["geojson", "json"]
    }

    fn format_name(&self) -> &str {
        "GeoJSON"
    }
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon<f64>>) {
    match &geometry.value {
        Value::Polygon(rings) => out.extend(rings_to_polygon(rings)),
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.extend(rings_to_polygon(rings));
            }
        }
        Value::GeometryCollection(geometries) => {
            for nested in geometries {
                collect_polygons(nested, out);
            }
        }
        _ => {}
    }
}

fn rings_to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let mut line_strings = rings.iter().map(|ring| {
        LineString::from(
            ring.iter()
                .filter(|position| position.len() >= 2)
                .map(|position| Coord { x: position[0], y: position[1] })
                .collect::<Vec<_>>(),
        )
    });
    let exterior = line_strings.next()?;
    Some(Polygon::new(exterior, line_strings.collect()))
}
