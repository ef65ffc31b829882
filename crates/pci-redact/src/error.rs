//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactError>;

/// Errors that can occur during redaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactError {
    /// Input was empty or had no header line to interpret as tabular data.
    /// Retrying cannot help; the caller should abort the invocation.
    #[error("content is empty or not in the expected tabular format")]
    EmptyContent,

    /// A rule pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),
}
