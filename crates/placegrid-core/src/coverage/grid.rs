//! Lattice generation over the boundary's bounding box.

use crate::boundary::RegionBoundary;
use crate::models::Coordinate;

/// Produce candidate search points on a regular lattice at `spacing_deg`
/// increments, keeping only points the boundary contains.
///
/// The lattice is anchored at cell centers (min + spacing/2): with a spacing
/// of `radius * overlap_factor` and `overlap_factor <= sqrt(2)`, every point
/// of the boundary then lies within half a cell diagonal (at most one
/// radius) of some lattice point, so a convex boundary is covered without
/// seams by construction.
///
/// Ordering is row-major (latitude ascending, then longitude ascending) and
/// deterministic for identical inputs.
pub fn generate_grid(boundary: &RegionBoundary, spacing_deg: f64) -> Vec<Coordinate> {
    // A non-positive or non-finite spacing would never terminate.
    if !(spacing_deg > 0.0 && spacing_deg.is_finite()) {
        return Vec::new();
    }

    let bbox = boundary.bounding_box();
    let mut points = Vec::new();
    let mut lat = bbox.min_lat + spacing_deg / 2.0;
    while lat <= bbox.max_lat {
        let mut lon = bbox.min_lon + spacing_deg / 2.0;
        while lon <= bbox.max_lon {
            let candidate = Coordinate { lat, lon };
            if boundary.contains(&candidate) {
                points.push(candidate);
            }
            lon += spacing_deg;
        }
        lat += spacing_deg;
    }
    points
}
