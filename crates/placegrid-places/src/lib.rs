//! HTTP client for the places nearby-search API.
//!
//! Wraps `reqwest` with typed response parsing, envelope status checking,
//! and retry with exponential back-off for transient failures. Implements
//! the core [`PlaceSearch`](placegrid_core::ports::PlaceSearch) port.

mod client;
mod error;
mod retry;
mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{NearbySearchResponse, PlaceResult};
