//! Remediation audit records.
//!
//! One append-only record per successful run. The partition key is
//! constant; the row key is derived from the processing timestamp so
//! string ordering matches chronological ordering.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Partition key shared by every remediation record.
pub const AUDIT_PARTITION_KEY: &str = "pci-finding";

/// Audit entry describing one completed remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationRecord {
    /// Location the object was quarantined in.
    pub source_location: String,
    /// Location the sanitized object was relocated to.
    pub dest_location: String,
    /// Name of the original quarantined object.
    pub original_name: String,
    /// Name of the relocated, redacted object.
    pub derived_name: String,
    /// Processing timestamp, RFC 3339.
    pub processed_at: String,
}

impl RemediationRecord {
    /// Build a record for a run processed at `at`.
    pub fn new(
        source_location: impl Into<String>,
        dest_location: impl Into<String>,
        original_name: impl Into<String>,
        derived_name: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_location: source_location.into(),
            dest_location: dest_location.into(),
            original_name: original_name.into(),
            derived_name: derived_name.into(),
            processed_at: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Row key for a record processed at `at`: the UTC microsecond
    /// timestamp, zero-padded so lexical order is chronological order.
    pub fn row_key(at: DateTime<Utc>) -> String {
        format!("{:020}", at.timestamp_micros())
    }

    /// Field map handed to the audit store.
    pub fn fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("SourceLocation".to_string(), self.source_location.clone()),
            ("DestinationLocation".to_string(), self.dest_location.clone()),
            ("OriginalName".to_string(), self.original_name.clone()),
            ("DerivedName".to_string(), self.derived_name.clone()),
            ("ProcessedAt".to_string(), self.processed_at.clone()),
        ])
    }
}
