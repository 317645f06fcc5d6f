//! Custom error types for the ebt-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum EbtError {
    /// An error originating from I/O operations (segment sources, output files).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// Alphabet decoding produced bytes that are not valid UTF-8 text.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The decoded text or host markup does not have the expected configuration shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A page's field list is missing or malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// One of the two fetched segments is not a valid compressed stream.
    #[error("Decompression of {segment} segment failed: {reason}")]
    Decompress {
        segment: &'static str,
        reason: String,
    },

    /// The reassembled data cannot carry the container header.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl EbtError {
    /// Returns `true` for failures of the reconstruction step, where the
    /// raw segments should be kept for inspection.
    pub fn is_reconstruction_failure(&self) -> bool {
        matches!(self, EbtError::Decompress { .. } | EbtError::InvalidFormat(_))
    }
}

impl From<serde_json::Error> for EbtError {
    fn from(e: serde_json::Error) -> Self {
        EbtError::Protocol(format!("configuration is not valid JSON: {}", e))
    }
}

/// A convenience `Result` type alias using the crate's `EbtError` type.
pub type Result<T> = std::result::Result<T, EbtError>;
