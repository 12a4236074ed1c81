//! Gap filling: convert uncovered residual areas into additional points.

use geo::algorithm::centroid::Centroid;
use geo::MultiPolygon;

use crate::models::Coordinate;

/// Emit one coordinate per connected component of the residual: its
/// centroid.
///
/// The centroid is a cheap, deterministic representative that usually falls
/// inside the under-covered area. It is not guaranteed to for highly
/// non-convex gaps; this is a density heuristic, not a correctness
/// guarantee, and the query circle centered there still reaches the gap.
pub fn fill_points(residual: &MultiPolygon<f64>) -> Vec<Coordinate> {
    residual
        .0
        .iter()
        .filter_map(|component| {
            let centroid = component.centroid()?;
            Coordinate::new(centroid.y(), centroid.x()).ok()
        })
        .collect()
}
