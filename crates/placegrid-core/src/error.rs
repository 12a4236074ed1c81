//! Error types for placegrid

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacegridError {
    // Boundary errors
    #[error("Boundary at {path} contains no polygon features")]
    EmptyBoundary { path: PathBuf },

    #[error("Boundary has zero area; check the source geometry")]
    ZeroAreaBoundary,

    #[error("Boundary CRS is not WGS84 (EPSG:4326): found {found}. Reproject the source before use")]
    CrsMismatch { found: String },

    #[error("Unsupported boundary format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to read {format} boundary: {message}")]
    BoundaryFormat { format: String, message: String },

    // Coordinate errors
    #[error("Coordinate out of range: lat={lat}, lon={lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Query errors (surfaced by the search port; recovered per-point by callers)
    #[error("Search query failed: {message}")]
    Query { message: String },

    // Sink errors
    #[error("Failed to write records: {message}")]
    Sink { message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlacegridError>;
