//! The remediation orchestrator.
//!
//! One invocation per arrived object, strictly sequential:
//! fetch → redact → relocate → delete source → audit → notify, with a
//! single escape edge to the failure path from any stage. The source
//! object is never deleted before its sanitized replacement is durably
//! written.
//!
//! Invocations for different objects may run concurrently; the pipeline
//! holds no mutable state, so one instance can serve them all.

use crate::audit::{RemediationRecord, AUDIT_PARTITION_KEY};
use crate::config::Config;
use crate::error::{diagnostic_trace, PipelineError, Result};
use crate::notify::{NotificationDispatcher, NotificationMessage};
use crate::retry::{run_with_retry, RetrySpec};
use crate::store::{AuditStore, MessageQueue, ObjectStore};
use chrono::{DateTime, SecondsFormat, Utc};
use pci_redact::RedactionEngine;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Identity of an arrived object, as delivered by the trigger source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Container the object arrived in.
    pub container: String,
    /// Object name within the container.
    pub name: String,
    /// Size in bytes as reported on arrival.
    pub size: u64,
}

/// Pipeline stages, in order. Linear; no stage is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Redacting,
    Relocating,
    Deleting,
    Auditing,
    Notifying,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Fetching => "fetching",
            Stage::Redacting => "redacting",
            Stage::Relocating => "relocating",
            Stage::Deleting => "deleting",
            Stage::Auditing => "auditing",
            Stage::Notifying => "notifying",
        };
        write!(f, "{}", s)
    }
}

/// Summary of one successful remediation, returned to the invoking
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// Name of the quarantined object.
    pub original_name: String,
    /// Name of the relocated, redacted object.
    pub derived_name: String,
    /// Data rows the field pass processed.
    pub rows_processed: usize,
    /// When the run processed the object.
    pub processed_at: DateTime<Utc>,
}

/// Orchestrates the end-to-end remediation of arrived objects.
pub struct Pipeline<'a> {
    config: &'a Config,
    engine: &'a RedactionEngine,
    objects: &'a dyn ObjectStore,
    audit: &'a dyn AuditStore,
    queue: &'a dyn MessageQueue,
    storage_retry: RetrySpec,
    notify_retry: RetrySpec,
}

impl<'a> Pipeline<'a> {
    /// Pipeline with the default retry specs.
    pub fn new(
        config: &'a Config,
        engine: &'a RedactionEngine,
        objects: &'a dyn ObjectStore,
        audit: &'a dyn AuditStore,
        queue: &'a dyn MessageQueue,
    ) -> Self {
        Self {
            config,
            engine,
            objects,
            audit,
            queue,
            storage_retry: RetrySpec::storage(),
            notify_retry: RetrySpec::queue_send(),
        }
    }

    /// Override both retry specs.
    pub fn with_retry_specs(mut self, storage: RetrySpec, notify: RetrySpec) -> Self {
        self.storage_retry = storage;
        self.notify_retry = notify;
        self
    }

    /// Remediate one arrived object.
    ///
    /// On success, exactly one `Success` notification has been sent and
    /// one audit record appended. On failure, exactly one `Failure`
    /// notification has been attempted and the triggering error is
    /// returned; a secondary failure while sending that notification is
    /// logged and never replaces the original error.
    pub fn handle(&self, object: &ObjectRef) -> Result<Remediation> {
        info!(
            container = %object.container,
            name = %object.name,
            size = object.size,
            "remediation started"
        );
        match self.run(object) {
            Ok(remediation) => {
                info!(
                    name = %remediation.original_name,
                    derived = %remediation.derived_name,
                    rows = remediation.rows_processed,
                    "remediation complete"
                );
                Ok(remediation)
            }
            Err((stage, err)) => {
                error!(%stage, name = %object.name, error = %err, "remediation failed");
                self.report_failure(object, stage, &err);
                Err(err)
            }
        }
    }

    /// The linear happy path. Errors carry the stage they escaped from.
    fn run(&self, object: &ObjectRef) -> std::result::Result<Remediation, (Stage, PipelineError)> {
        let text = self.fetch(object).map_err(|e| (Stage::Fetching, e))?;

        let redacted = self
            .engine
            .redact(&text)
            .map_err(|e| (Stage::Redacting, e.into()))?;
        info!(
            name = %object.name,
            rows = redacted.rows_processed,
            "content redacted"
        );

        let processed_at = Utc::now();
        let derived_name = derived_object_name(&object.name, processed_at);
        self.relocate(&derived_name, redacted.redacted_text.as_bytes())
            .map_err(|e| (Stage::Relocating, e))?;

        self.delete_source(object).map_err(|e| (Stage::Deleting, e))?;

        self.append_audit(object, &derived_name, processed_at)
            .map_err(|e| (Stage::Auditing, e))?;

        self.notify_success(object, &derived_name, processed_at)
            .map_err(|e| (Stage::Notifying, e))?;

        Ok(Remediation {
            original_name: object.name.clone(),
            derived_name,
            rows_processed: redacted.rows_processed,
            processed_at,
        })
    }

    fn fetch(&self, object: &ObjectRef) -> Result<String> {
        let bytes = run_with_retry(&self.storage_retry, "object fetch", || {
            self.objects.get(&object.container, &object.name)
        })?;
        info!(name = %object.name, bytes = bytes.len(), "object fetched");
        String::from_utf8(bytes).map_err(|e| {
            PipelineError::ContentFormat(format!("object is not valid UTF-8: {}", e))
        })
    }

    fn relocate(&self, derived_name: &str, bytes: &[u8]) -> Result<()> {
        let dest = &self.config.destination_container;
        run_with_retry(&self.storage_retry, "ensure destination", || {
            self.objects.ensure_container(dest)
        })?;
        run_with_retry(&self.storage_retry, "redacted upload", || {
            self.objects.put(dest, derived_name, bytes)
        })?;
        info!(container = %dest, name = derived_name, "redacted object relocated");
        Ok(())
    }

    fn delete_source(&self, object: &ObjectRef) -> Result<()> {
        run_with_retry(&self.storage_retry, "source delete", || {
            self.objects.delete(&object.container, &object.name)
        })?;
        info!(
            container = %object.container,
            name = %object.name,
            "source object deleted"
        );
        Ok(())
    }

    fn append_audit(
        &self,
        object: &ObjectRef,
        derived_name: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<()> {
        let record = RemediationRecord::new(
            &object.container,
            &self.config.destination_container,
            &object.name,
            derived_name,
            processed_at,
        );
        let row_key = RemediationRecord::row_key(processed_at);
        self.audit
            .append(AUDIT_PARTITION_KEY, &row_key, &record.fields())?;
        info!(row_key = %row_key, "remediation audited");
        Ok(())
    }

    fn notify_success(
        &self,
        object: &ObjectRef,
        derived_name: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<()> {
        let message = NotificationMessage::Success {
            source_location: object.container.clone(),
            dest_location: self.config.destination_container.clone(),
            original_name: object.name.clone(),
            derived_name: derived_name.to_string(),
            processed_at: processed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        self.dispatcher().send(&self.config.success_queue, &message)
    }

    /// Dispatch the failure notification. A secondary failure here is
    /// logged only; the original error always wins.
    fn report_failure(&self, object: &ObjectRef, stage: Stage, err: &PipelineError) {
        let message = NotificationMessage::Failure {
            object_name: object.name.clone(),
            error_message: err.to_string(),
            stack_trace: format!("stage: {}\n{}", stage, diagnostic_trace(err)),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        if let Err(notify_err) = self.dispatcher().send(&self.config.failure_queue, &message) {
            error!(
                queue = %self.config.failure_queue,
                error = %notify_err,
                "failure notification could not be delivered"
            );
        }
    }

    fn dispatcher(&self) -> NotificationDispatcher<'_> {
        NotificationDispatcher::with_spec(self.queue, self.notify_retry.clone())
    }
}

/// Derived name for the relocated object:
/// `{base}_redacted_{YYYYMMDDHHMMSS}{extension}`, whole-second
/// resolution.
pub fn derived_object_name(original: &str, at: DateTime<Utc>) -> String {
    let (base, extension) = split_extension(original);
    format!("{}_redacted_{}{}", base, at.format("%Y%m%d%H%M%S"), extension)
}

/// Split at the last interior dot, keeping the dot with the extension.
/// A leading dot is part of the base name, not an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}
