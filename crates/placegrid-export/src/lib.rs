//! Tabular sinks for placegrid.
//!
//! Implements the core [`RecordSink`](placegrid_core::ports::RecordSink)
//! port over CSV files, plus planned-point export and a folder merge that
//! tags every row with its source file's category.

mod merge;
mod sink;

pub use merge::{merge_csv_dir, MergeSummary};
pub use sink::{write_points, CsvSink};
