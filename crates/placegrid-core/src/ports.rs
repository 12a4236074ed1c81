//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coordinate, PlaceRecord};

/// Port for the external places-search collaborator.
///
/// One call issues one query. The call may be slow and may fail; callers
/// recover per point by treating a failure as zero results for that
/// point/category, logged and counted, never fatal to the run. Retries and
/// backoff are the adapter's concern.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<PlaceRecord>>;
}

/// Port for the tabular sink collaborator.
///
/// Accepts flat, field-name-keyed records; the core stays agnostic to the
/// file format behind it.
pub trait RecordSink {
    fn write(&mut self, records: &[PlaceRecord]) -> Result<()>;
}
