//! Bounded retry with exponential backoff.
//!
//! A single generic executor shared by every storage and queue call site;
//! the only thing that varies per site is the [`RetrySpec`] passed in.
//! Retryability travels with the spec as an explicit kind list, so an
//! operation never decides its own retry policy.

use crate::store::{StoreError, StoreErrorKind};
use std::time::Duration;
use tracing::{error, info, warn};

/// Error kinds expected to clear on their own for storage operations.
pub const STORAGE_TRANSIENT_KINDS: &[StoreErrorKind] = &[
    StoreErrorKind::NotFound,
    StoreErrorKind::Timeout,
    StoreErrorKind::Throttled,
];

/// Error kinds worth retrying for queue sends. Auth handshakes to the
/// queue service are known to fail transiently right after credential
/// rotation.
pub const QUEUE_TRANSIENT_KINDS: &[StoreErrorKind] = &[
    StoreErrorKind::NotFound,
    StoreErrorKind::Timeout,
    StoreErrorKind::Throttled,
    StoreErrorKind::AuthRejected,
];

/// Attempt-count and backoff parameters for one retried operation.
#[derive(Debug, Clone)]
pub struct RetrySpec {
    /// Total attempts, including the first (must be at least 1).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: u32,
    /// Error kinds that are worth retrying. Anything else propagates
    /// immediately.
    pub retryable: &'static [StoreErrorKind],
}

impl RetrySpec {
    /// Default spec for object/audit storage operations: 3 attempts,
    /// 1 second initial delay, doubling.
    pub fn storage() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            backoff_multiplier: 2,
            retryable: STORAGE_TRANSIENT_KINDS,
        }
    }

    /// Default spec for queue sends: 3 attempts, 2 second initial delay,
    /// doubling.
    pub fn queue_send() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            backoff_multiplier: 2,
            retryable: QUEUE_TRANSIENT_KINDS,
        }
    }

    /// Whether `err` is in this spec's retryable set.
    pub fn is_retryable(&self, err: &StoreError) -> bool {
        self.retryable.contains(&err.kind)
    }

    /// Backoff delay after the (`failed_attempts`)-th failure:
    /// `initial_delay * multiplier^(failed_attempts - 1)`.
    pub fn delay_after(&self, failed_attempts: u32) -> Duration {
        let exp = failed_attempts.saturating_sub(1).min(16);
        self.initial_delay * self.backoff_multiplier.saturating_pow(exp)
    }
}

/// Run `op` under `spec`, sleeping between attempts.
///
/// On a retryable failure with attempts remaining, sleeps the backoff
/// delay and retries. On a non-retryable failure, or once attempts are
/// exhausted, the original [`StoreError`] is propagated unchanged. Every
/// attempt and every backoff delay is logged.
pub fn run_with_retry<T, F>(spec: &RetrySpec, label: &str, mut op: F) -> Result<T, StoreError>
where
    F: FnMut() -> Result<T, StoreError>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op() {
            Ok(value) => {
                if attempt > 1 {
                    info!(label, attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if !spec.is_retryable(&err) => {
                error!(label, error = %err, "non-retryable failure");
                return Err(err);
            }
            Err(err) if attempt >= spec.max_attempts => {
                error!(label, attempts = attempt, error = %err, "retries exhausted");
                return Err(err);
            }
            Err(err) => {
                let delay = spec.delay_after(attempt);
                warn!(
                    label,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient failure, backing off"
                );
                std::thread::sleep(delay);
            }
        }
    }
}
