//! Error types for the places client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network-level or non-2xx HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-OK envelope status.
    #[error("Places API error ({status}): {message}")]
    Api { status: String, message: String },

    /// `OVER_QUERY_LIMIT`: daily or per-second quota exhausted. Never
    /// retried; the quota will not recover within a back-off window.
    #[error("Places API quota exhausted: {0}")]
    QuotaExceeded(String),

    /// The response body did not match the expected shape.
    #[error("Failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },

    /// Client construction problem (e.g. an unparseable base URL).
    #[error("Invalid client configuration: {0}")]
    Config(String),
}
