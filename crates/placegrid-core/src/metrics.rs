//! Per-run metrics accumulator.
//!
//! One explicit accumulator passed through the pipeline instead of
//! process-wide mutable counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    // Planning
    pub grid_points: usize,
    pub gap_fill_points: usize,
    pub points_deduped: usize,

    // Query issuance
    pub queries_issued: usize,
    pub query_failures: usize,

    // Result merging
    pub records_seen: usize,
    pub records_merged: usize,
    pub duplicates_dropped: usize,
    pub missing_coordinate: usize,
    pub outside_boundary: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            grid_points: 0,
            gap_fill_points: 0,
            points_deduped: 0,
            queries_issued: 0,
            query_failures: 0,
            records_seen: 0,
            records_merged: 0,
            duplicates_dropped: 0,
            missing_coordinate: 0,
            outside_boundary: 0,
        }
    }

    /// Total points the planner emitted for querying.
    pub fn planned_points(&self) -> usize {
        self.grid_points + self.gap_fill_points - self.points_deduped
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
