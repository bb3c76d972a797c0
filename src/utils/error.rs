//! Error types and handling
//!
//! Value construction fails only on malformed timestamps. Catalog assembly
//! can additionally fail when an edge names a resource the catalog does not
//! contain.

use thiserror::Error;

/// Errors raised while turning PuppetDB data into value types
#[derive(Debug, Error)]
pub enum TypesError {
    /// A timestamp field was present but not ISO-8601 text
    #[error("Invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// A catalog edge references a resource missing from the catalog
    #[error("Unknown resource in catalog edge: {0}")]
    UnknownResource(String),

    /// JSON decoding of a PuppetDB document failed
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for value construction
pub type TypesResult<T> = Result<T, TypesError>;
