//! Error types for the transform pipeline

use thiserror::Error;

/// Errors that can occur during a pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Source text was empty or whitespace-only
    #[error("source text is empty")]
    EmptyInput,
}

/// Errors reported when an artifact cannot be decoded back to source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Artifact does not match any known encoder shell
    #[error("unrecognised artifact format")]
    UnknownFormat,

    /// Embedded payload is malformed for its encoder
    #[error("malformed {method} payload: {reason}")]
    MalformedPayload {
        /// Encoder name the artifact was detected as
        method: &'static str,
        /// What went wrong
        reason: String,
    },

    /// Decoded text differs from the expected source
    #[error("decoded text does not match the source ({decoded_len} vs {expected_len} bytes)")]
    Mismatch {
        /// Length of the recovered text in bytes
        decoded_len: usize,
        /// Length of the expected text in bytes
        expected_len: usize,
    },
}

/// Errors from loader URL validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// No URL given
    #[error("URL is empty")]
    Empty,

    /// Not an http(s) URL
    #[error("invalid URL format: {0}")]
    InvalidFormat(String),

    /// Plain http while https is required
    #[error("HTTPS is required: {0}")]
    HttpsRequired(String),
}
