//! placegrid core - region boundary, coverage-search planning, and deduplication
//!
//! This crate contains the domain logic for covering a geographic region with
//! search points and consolidating the query results, plus the port
//! definitions that adapters (HTTP client, tabular sinks) implement.

pub mod boundary;
pub mod config;
pub mod coverage;
pub mod dedup;
pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;

pub use error::{PlacegridError, Result};
