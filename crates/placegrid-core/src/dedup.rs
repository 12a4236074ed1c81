//! Result deduplication across repeated and overlapping queries.

use std::collections::HashSet;

use crate::boundary::RegionBoundary;
use crate::metrics::RunMetrics;
use crate::models::PlaceRecord;

/// The value used to decide that two result records refer to the same
/// real-world place: provider identifier when present, otherwise the
/// lowercased name plus the exact coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupKey {
    Provider(String),
    NameLocation(String, u64, u64),
}

/// Merges query batches into a unique-by-identity result set.
///
/// Sole owner of the identifier-seen-set for the whole run; first seen wins
/// and later duplicates are dropped silently, as expected given overlapping
/// search circles. Records with a missing coordinate or falling outside the
/// boundary are excluded and counted, not merely flagged.
pub struct ResultDeduplicator<'a> {
    boundary: &'a RegionBoundary,
    seen: HashSet<DedupKey>,
}

impl<'a> ResultDeduplicator<'a> {
    pub fn new(boundary: &'a RegionBoundary) -> Self {
        Self { boundary, seen: HashSet::new() }
    }

    /// Merge one batch, returning only the records not seen before.
    pub fn merge(&mut self, batch: Vec<PlaceRecord>, metrics: &mut RunMetrics) -> Vec<PlaceRecord> {
        let mut fresh = Vec::new();
        for record in batch {
            metrics.records_seen += 1;

            let Some(coordinate) = record.coordinate else {
                metrics.missing_coordinate += 1;
                continue;
            };
            if !self.boundary.contains(&coordinate) {
                metrics.outside_boundary += 1;
                continue;
            }

            let key = match &record.id {
                Some(id) => DedupKey::Provider(id.clone()),
                None => {
                    let (lat_bits, lon_bits) = coordinate.bits();
                    DedupKey::NameLocation(record.name.to_lowercase(), lat_bits, lon_bits)
                }
            };

            if self.seen.insert(key) {
                metrics.records_merged += 1;
                fresh.push(record);
            } else {
                metrics.duplicates_dropped += 1;
            }
        }
        fresh
    }

    /// Number of unique places seen so far.
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }
}
