//! Error types for the skein crate.
//!
//! Matching itself never fails. Errors only arise while building patterns,
//! validating structures, or decoding documents.

use thiserror::Error;

/// Errors that can occur when building or decoding filters and values.
#[derive(Debug, Error)]
pub enum SkeinError {
    /// Invalid text pattern.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A value or filter has a shape the matcher refuses to evaluate.
    #[error("malformed structure: {0}")]
    Structure(#[from] StructureError),

    /// A serialized document could not be decoded.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// A document could not be encoded.
    #[error("failed to encode document: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for SkeinError {
    fn from(e: serde_json::Error) -> Self {
        SkeinError::Decode(e.to_string())
    }
}

impl From<serde_yaml::Error> for SkeinError {
    fn from(e: serde_yaml::Error) -> Self {
        SkeinError::Decode(e.to_string())
    }
}

/// Malformed value or filter structures, rejected before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// Nesting exceeds the configured depth limit.
    #[error("nesting depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },

    /// A record or field map names the same field twice.
    #[error("field '{0}' appears more than once")]
    DuplicateField(String),

    /// The data model cannot hold this shape.
    #[error("{0} cannot be represented")]
    Unsupported(&'static str),
}

/// Result type for skein operations.
pub type Result<T> = std::result::Result<T, SkeinError>;
