//! Search profiles and planned search points.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A (category, radius) pair driving one independent coverage pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    /// Category label passed through to the search API (e.g. "hospital").
    pub category: String,

    /// Search radius in meters.
    pub radius_m: f64,
}

impl SearchProfile {
    pub fn new(category: impl Into<String>, radius_m: f64) -> Self {
        Self { category: category.into(), radius_m }
    }
}

/// How a search point entered the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointOrigin {
    /// Produced by the initial lattice sweep.
    Grid,
    /// Produced by the coverage-gap filler.
    GapFill,
}

impl std::fmt::Display for PointOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointOrigin::Grid => write!(f, "grid"),
            PointOrigin::GapFill => write!(f, "gap-fill"),
        }
    }
}

/// A planned query location: created during planning, consumed exactly once
/// per issued query, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPoint {
    pub coordinate: Coordinate,
    pub profile: SearchProfile,
    pub origin: PointOrigin,
}

impl SearchPoint {
    pub fn new(coordinate: Coordinate, profile: SearchProfile, origin: PointOrigin) -> Self {
        Self { coordinate, profile, origin }
    }
}
