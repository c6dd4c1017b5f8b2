//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while parsing, compiling or serializing documents.
///
/// Malformed markup and out-of-range style intervals are not errors: they are
/// repaired or clamped during compilation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The input had no content at all
    #[error("input document is empty")]
    EmptyInput,
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::SerializationError(err.to_string())
    }
}
