//! Error types for dialdeck-core

use thiserror::Error;

/// Main error type for the dialdeck-core library
///
/// Degenerate analytics inputs (zero denominators, missing campaign dates,
/// absent previous periods) are not errors; they map to defined values so
/// presentation code can render placeholders. Errors are reserved for
/// malformed configuration and boundary decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error for store row payloads
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A filter that violates its own invariants (hour range out of
    /// bounds, empty weekday set)
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

/// Result type alias for dialdeck-core
pub type Result<T> = std::result::Result<T, Error>;
