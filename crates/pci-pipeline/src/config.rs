//! Process configuration.
//!
//! Loaded once at process entry and passed by reference into the
//! pipeline; no component reads the environment after startup. Any
//! missing or empty entry is fatal before work is attempted.

use crate::error::{PipelineError, Result};

/// Environment variable names, in the order they are read.
pub const ENV_STORAGE_ACCOUNT: &str = "STORAGE_ACCOUNT_NAME";
pub const ENV_QUARANTINE_CONTAINER: &str = "QUARANTINE_CONTAINER";
pub const ENV_DESTINATION_CONTAINER: &str = "DESTINATION_CONTAINER";
pub const ENV_AUDIT_TABLE: &str = "AUDIT_TABLE_NAME";
pub const ENV_SUCCESS_QUEUE: &str = "SUCCESS_QUEUE";
pub const ENV_FAILURE_QUEUE: &str = "FAILURE_QUEUE";
pub const ENV_TABLE_CONNECTION: &str = "TABLE_CONNECTION_STRING";
pub const ENV_QUEUE_CONNECTION: &str = "QUEUE_CONNECTION_STRING";

/// Components the queue connection string must carry.
const QUEUE_CONNECTION_PARTS: &[&str] = &["Endpoint=", "SharedAccessKeyName=", "SharedAccessKey="];

/// Settings for one pipeline process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage account identity.
    pub storage_account: String,
    /// Holding area for objects pending redaction.
    pub quarantine_container: String,
    /// Sanitized-output area.
    pub destination_container: String,
    /// Audit store table name.
    pub audit_table: String,
    /// Queue receiving success notifications.
    pub success_queue: String,
    /// Queue receiving failure notifications.
    pub failure_queue: String,
    /// Connection parameters for the audit store.
    pub table_connection_string: String,
    /// Connection parameters for the queue service.
    pub queue_connection_string: String,
}

impl Config {
    /// Load configuration from the environment, failing on the first
    /// missing or empty entry.
    pub fn from_env() -> Result<Self> {
        let config = Config {
            storage_account: require(ENV_STORAGE_ACCOUNT)?,
            quarantine_container: require(ENV_QUARANTINE_CONTAINER)?,
            destination_container: require(ENV_DESTINATION_CONTAINER)?,
            audit_table: require(ENV_AUDIT_TABLE)?,
            success_queue: require(ENV_SUCCESS_QUEUE)?,
            failure_queue: require(ENV_FAILURE_QUEUE)?,
            table_connection_string: require(ENV_TABLE_CONNECTION)?,
            queue_connection_string: require(ENV_QUEUE_CONNECTION)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Structural checks beyond presence.
    pub fn validate(&self) -> Result<()> {
        validate_queue_connection_string(&self.queue_connection_string)
    }
}

fn require(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PipelineError::Config(format!("{} is not set", name))),
    }
}

/// Verify the queue connection string carries an endpoint, a key name,
/// and a key before first use.
pub fn validate_queue_connection_string(connection_string: &str) -> Result<()> {
    for part in QUEUE_CONNECTION_PARTS {
        if !connection_string.contains(part) {
            return Err(PipelineError::Config(format!(
                "queue connection string is missing {}",
                part.trim_end_matches('=')
            )));
        }
    }
    Ok(())
}
