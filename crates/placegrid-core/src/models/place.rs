//! Place records returned by the search collaborator.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// One business listing from a query response.
///
/// Created per API response item and merged by the deduplicator keyed on the
/// provider identifier (fallback: lowercased name + coordinate when the
/// identifier is absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider identifier, when the API supplies one.
    pub id: Option<String>,

    pub name: String,

    /// Missing coordinates cause the record to be dropped (and counted)
    /// during merging.
    pub coordinate: Option<Coordinate>,

    /// Category tags as reported by the provider.
    pub categories: Vec<String>,

    /// Operational status (e.g. "OPERATIONAL", "CLOSED_PERMANENTLY").
    pub status: Option<String>,

    pub rating: Option<f64>,

    pub user_ratings_total: Option<u64>,

    /// Short human-readable address, when present.
    pub address: Option<String>,
}

impl PlaceRecord {
    /// Minimal record for tests and synthetic data.
    pub fn new(id: Option<String>, name: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            categories: Vec::new(),
            status: None,
            rating: None,
            user_ratings_total: None,
            address: None,
        }
    }
}
