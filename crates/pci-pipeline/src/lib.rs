//! Remediation pipeline for quarantined payment-card data.
//!
//! Sequences the end-to-end handling of one arrived object: fetch the
//! content, redact it through [`pci_redact`], relocate the sanitized
//! result, delete the source, append an audit record, and emit exactly
//! one status notification. Storage and queue calls go through abstract
//! collaborator traits and a shared bounded-retry executor.
//!
//! The event-arrival mechanism and the concrete store backends live
//! outside this crate: a host resolves its trigger payload into an
//! [`ObjectRef`], builds a [`Config`] at process entry, and calls
//! [`Pipeline::handle`] once per object. Invocations are independent and
//! may run concurrently.
//!
//! # Example
//!
//! ```ignore
//! use pci_pipeline::{Config, ObjectRef, Pipeline};
//! use pci_redact::RedactionEngine;
//!
//! let config = Config::from_env()?;
//! let engine = RedactionEngine::new();
//! let pipeline = Pipeline::new(&config, &engine, &objects, &audit, &queue);
//! pipeline.handle(&ObjectRef {
//!     container: config.quarantine_container.clone(),
//!     name: "data.csv".into(),
//!     size: 1024,
//! })?;
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod retry;
pub mod store;

pub use audit::{RemediationRecord, AUDIT_PARTITION_KEY};
pub use config::{validate_queue_connection_string, Config};
pub use error::{diagnostic_trace, PipelineError, Result};
pub use logging::{init_logging, LogFormat};
pub use notify::{NotificationDispatcher, NotificationMessage};
pub use pipeline::{derived_object_name, ObjectRef, Pipeline, Remediation, Stage};
pub use retry::{run_with_retry, RetrySpec, QUEUE_TRANSIENT_KINDS, STORAGE_TRANSIENT_KINDS};
pub use store::{AuditStore, MessageQueue, ObjectStore, StoreError, StoreErrorKind};
