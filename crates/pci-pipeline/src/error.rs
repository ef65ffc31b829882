//! Error taxonomy for the remediation pipeline.
//!
//! Errors are recovered (retried) only at the boundary where they occur;
//! once retries are exhausted they propagate uncaught to the
//! orchestrator's single failure edge, which decides notification and
//! final status.

use crate::store::StoreError;
use pci_redact::RedactError;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Unified error type for the remediation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required setting is absent at start. Fatal; no work is
    /// attempted.
    #[error("configuration error: {0}")]
    Config(String),

    /// A store operation failed and retries (if any) were exhausted.
    #[error("storage operation failed: {0}")]
    Storage(#[from] StoreError),

    /// Fetched content cannot be interpreted as tabular data. Not
    /// retried; retrying will not help.
    #[error("content format error: {0}")]
    ContentFormat(String),

    /// A notification could not be delivered after retries. Never masks
    /// the error that triggered the notification.
    #[error("notification delivery to '{queue}' failed: {source}")]
    NotificationDelivery {
        queue: String,
        #[source]
        source: StoreError,
    },

    /// Payload serialization failed.
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RedactError> for PipelineError {
    fn from(err: RedactError) -> Self {
        PipelineError::ContentFormat(err.to_string())
    }
}

/// Render an error and its source chain for the failure notification's
/// diagnostic field.
pub fn diagnostic_trace(err: &PipelineError) -> String {
    let mut trace = format!("error: {}", err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        trace.push_str(&format!("\ncaused by: {}", cause));
        source = cause.source();
    }
    trace
}
