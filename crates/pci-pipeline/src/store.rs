//! Collaborator contracts for the external stores.
//!
//! The pipeline talks to three abstract services: an object store holding
//! the quarantined and sanitized objects, an append-only audit store, and
//! a message queue for status notifications. Concrete backends live
//! outside this crate; everything here is a trait plus the shared
//! infrastructure error type.
//!
//! Every call is blocking and may fail with a [`StoreError`]. Whether a
//! failure is worth retrying is decided by the [`RetrySpec`] at the call
//! site, never by the operation itself.
//!
//! [`RetrySpec`]: crate::retry::RetrySpec

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Classification of an infrastructure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorKind {
    /// Entity or container not visible yet.
    NotFound,
    /// The operation timed out.
    Timeout,
    /// The service throttled the request.
    Throttled,
    /// The authentication handshake was rejected.
    AuthRejected,
    /// Row-key collision on an append-only store. Retrying the same
    /// append cannot succeed.
    AlreadyExists,
    /// Anything else.
    Other,
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StoreErrorKind::NotFound => "not_found",
            StoreErrorKind::Timeout => "timeout",
            StoreErrorKind::Throttled => "throttled",
            StoreErrorKind::AuthRejected => "auth_rejected",
            StoreErrorKind::AlreadyExists => "already_exists",
            StoreErrorKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// An infrastructure failure from a store or queue call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct StoreError {
    /// Failure classification, used for retry decisions.
    pub kind: StoreErrorKind,
    /// Backend-specific detail.
    pub message: String,
}

impl StoreError {
    /// Build an error with an explicit kind.
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`StoreErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`StoreErrorKind::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Timeout, message)
    }

    /// Convenience constructor for [`StoreErrorKind::AlreadyExists`].
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::AlreadyExists, message)
    }
}

/// Object storage: the quarantine and destination locations.
///
/// `Send + Sync` so one pipeline instance can serve concurrent
/// invocations.
pub trait ObjectStore: Send + Sync {
    /// Read the full content of an object.
    fn get(&self, container: &str, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Create or overwrite an object.
    fn put(&self, container: &str, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove an object.
    fn delete(&self, container: &str, name: &str) -> Result<(), StoreError>;

    /// Create the container if it does not exist. Idempotent.
    fn ensure_container(&self, container: &str) -> Result<(), StoreError>;
}

/// Append-only audit storage.
pub trait AuditStore: Send + Sync {
    /// Append one record. Fails with [`StoreErrorKind::AlreadyExists`]
    /// if `row_key` collides within `partition_key`.
    fn append(
        &self,
        partition_key: &str,
        row_key: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), StoreError>;
}

/// At-least-once message queue. Ordering across messages is not
/// guaranteed.
pub trait MessageQueue: Send + Sync {
    /// Send one serialized payload to a named queue.
    fn send(&self, queue_name: &str, payload: &str) -> Result<(), StoreError>;
}
