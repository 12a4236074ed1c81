//! Coverage validation: union of circles versus the boundary.

use geo::{Area, BooleanOps, MultiPolygon, UnaryUnion};

use crate::boundary::RegionBoundary;
use crate::coverage::circle::CoverageCircle;
use crate::models::Coordinate;

/// Union-of-circles coverage for one profile, produced once per planning
/// pass. Transient; never persisted.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Union of all issued coverage circles.
    pub union: MultiPolygon<f64>,

    /// Area within the boundary not covered by any circle. Empty when
    /// coverage is complete.
    pub residual: MultiPolygon<f64>,

    /// Fraction of the boundary's area covered by the union, in [0, 1].
    pub covered_ratio: f64,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.residual.0.is_empty()
    }

    pub fn uncovered_ratio(&self) -> f64 {
        1.0 - self.covered_ratio
    }
}

/// Build a coverage circle per point, union them, and subtract the union
/// from the boundary.
///
/// `vertices` must match the planner's circle approximation so that residual
/// accounting agrees with what the planner believes it covered.
pub fn residual(
    boundary: &RegionBoundary,
    points: &[Coordinate],
    radius_m: f64,
    vertices: u32,
) -> CoverageReport {
    let circles: Vec<_> = points
        .iter()
        .map(|center| CoverageCircle::new(*center, radius_m).to_polygon(vertices))
        .collect();
    let union: MultiPolygon<f64> = circles.iter().unary_union();
    let residual = boundary.as_multi_polygon().difference(&union);

    let boundary_area = boundary.area_sq_deg();
    let covered_ratio = if boundary_area > 0.0 {
        (1.0 - residual.unsigned_area() / boundary_area).clamp(0.0, 1.0)
    } else {
        1.0
    };

    CoverageReport { union, residual, covered_ratio }
}
