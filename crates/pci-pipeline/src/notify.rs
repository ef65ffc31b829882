//! Status notifications.
//!
//! One message per completed invocation: `Success` to the success queue
//! or `Failure` to the failure queue, serialized as a self-describing
//! JSON payload tagged by `status`. Each logical queue is addressed
//! independently by the orchestrator; a send never falls back to a
//! different queue.

use crate::error::{PipelineError, Result};
use crate::retry::{run_with_retry, RetrySpec};
use crate::store::MessageQueue;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Payload published to the status queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NotificationMessage {
    /// The object was redacted, relocated, and audited.
    #[serde(rename_all = "camelCase")]
    Success {
        source_location: String,
        dest_location: String,
        original_name: String,
        derived_name: String,
        processed_at: String,
    },
    /// The invocation failed; carries the triggering error and a full
    /// diagnostic trace.
    #[serde(rename = "failed", rename_all = "camelCase")]
    Failure {
        object_name: String,
        error_message: String,
        stack_trace: String,
        timestamp: String,
    },
}

/// Serializes status payloads and publishes them through a retried
/// queue send.
pub struct NotificationDispatcher<'a> {
    queue: &'a dyn MessageQueue,
    spec: RetrySpec,
}

impl<'a> NotificationDispatcher<'a> {
    /// Dispatcher with the default queue-send retry spec.
    pub fn new(queue: &'a dyn MessageQueue) -> Self {
        Self {
            queue,
            spec: RetrySpec::queue_send(),
        }
    }

    /// Dispatcher with a custom retry spec.
    pub fn with_spec(queue: &'a dyn MessageQueue, spec: RetrySpec) -> Self {
        Self { queue, spec }
    }

    /// Serialize `message` and send it to `queue_name`.
    ///
    /// Fails with [`PipelineError::NotificationDelivery`] once the retry
    /// spec is exhausted.
    pub fn send(&self, queue_name: &str, message: &NotificationMessage) -> Result<()> {
        let payload = serde_json::to_string(message)?;
        run_with_retry(&self.spec, "queue send", || {
            self.queue.send(queue_name, &payload)
        })
        .map_err(|source| PipelineError::NotificationDelivery {
            queue: queue_name.to_string(),
            source,
        })?;
        info!(queue = queue_name, "notification sent");
        Ok(())
    }
}
