//! Error types for cqlwire
//!
//! Every failure in this layer is value-level and deterministic: the same
//! input always fails the same way, and nothing is retried.

use thiserror::Error;

use crate::types::{DataType, ProtocolVersion};

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Unified error type for codec operations
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Version Gating
    // -------------------------------------------------------------------------
    #[error("{cql_type} requires protocol version {min_version} or higher, active version is {version}")]
    ProtocolVersion {
        cql_type: DataType,
        version: ProtocolVersion,
        min_version: ProtocolVersion,
    },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Buffer underflow: needed {needed} bytes, {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported type: no codec can be resolved for {0}")]
    UnsupportedType(DataType),

    #[error("Invalid type expression: {0}")]
    TypeSyntax(String),

    // -------------------------------------------------------------------------
    // Value Tree Errors
    // -------------------------------------------------------------------------
    #[error("JSON conversion error: {0}")]
    Json(String),
}

impl CodecError {
    /// Fixed-width value whose byte count does not match its wire width
    pub fn invalid_length(what: &str, expected: usize, actual: usize) -> Self {
        CodecError::InvalidEncoding(format!(
            "Invalid {} value, expected {}, got {} bytes",
            what, expected, actual
        ))
    }

    /// Value handed to a codec that cannot represent it
    pub fn kind_mismatch(cql_type: &DataType, value_kind: &str) -> Self {
        CodecError::InvalidEncoding(format!(
            "Invalid value for {}: got {}",
            cql_type, value_kind
        ))
    }
}
