//! Main redaction engine.
//!
//! Two passes in fixed order: the pattern pass runs every rule over the
//! entire raw text, then the tabular field pass masks whole cells whose
//! column name is in the sensitive set. The field pass runs second, so a
//! sensitive cell already rewritten by a pattern rule still ends up as the
//! field mask.

use crate::fields::SensitiveFieldSet;
use crate::rules::{default_rules, RedactionRule};
use crate::{RedactError, Result};
use tracing::debug;

/// Mask applied to whole cells of sensitive columns.
pub const MASK_FIELD: &str = "[REDACTED]";

/// Default field delimiter for the tabular pass.
pub const DEFAULT_DELIMITER: char = ',';

/// Result of one redaction invocation.
///
/// Produced once per invocation and consumed by the caller to build the
/// output object; never persisted on its own.
#[derive(Debug, Clone)]
pub struct RedactionResult {
    /// The raw input, untouched.
    pub original_text: String,
    /// The fully redacted output.
    pub redacted_text: String,
    /// Number of data rows the field pass processed (header excluded,
    /// blank lines excluded).
    pub rows_processed: usize,
}

/// The redaction engine: an ordered rule table plus a sensitive-field set.
///
/// Pure function of its inputs; no I/O. One instance can serve concurrent
/// invocations.
pub struct RedactionEngine {
    rules: Vec<RedactionRule>,
    sensitive_fields: SensitiveFieldSet,
    delimiter: char,
}

impl RedactionEngine {
    /// Engine with the default PCI rule table and field set.
    pub fn new() -> Self {
        Self::with_fields(SensitiveFieldSet::pci_default())
    }

    /// Engine with the default rule table and a custom field set.
    pub fn with_fields(sensitive_fields: SensitiveFieldSet) -> Self {
        Self {
            rules: default_rules().to_vec(),
            sensitive_fields,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Engine with a custom rule table and field set.
    pub fn with_rules(rules: Vec<RedactionRule>, sensitive_fields: SensitiveFieldSet) -> Self {
        Self {
            rules,
            sensitive_fields,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Override the field delimiter for the tabular pass.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Redact `raw` through the pattern pass and the tabular field pass.
    ///
    /// Fails with [`RedactError::EmptyContent`] when the input is empty or
    /// has no header line.
    pub fn redact(&self, raw: &str) -> Result<RedactionResult> {
        if raw.is_empty() {
            return Err(RedactError::EmptyContent);
        }

        let text = self.pattern_pass(raw);
        let (redacted_text, rows_processed) = self.field_pass(&text)?;

        debug!(
            rules = self.rules.len(),
            rows = rows_processed,
            bytes_in = raw.len(),
            bytes_out = redacted_text.len(),
            "redaction complete"
        );

        Ok(RedactionResult {
            original_text: raw.to_string(),
            redacted_text,
            rows_processed,
        })
    }

    /// Apply every rule in table order, each a global replace over the
    /// whole text before the next rule runs.
    fn pattern_pass(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in &self.rules {
            let hits = rule.matches(&text);
            if hits > 0 {
                debug!(rule = rule.name(), hits, "applying pattern rule");
                text = rule.apply(&text);
            }
        }
        text
    }

    /// Split into lines, treat the first as the header, and mask every
    /// cell whose column name is sensitive. Blank lines are dropped.
    /// Rows are zipped positionally with the header, truncating to the
    /// shorter side.
    fn field_pass(&self, text: &str) -> Result<(String, usize)> {
        let mut lines = text.lines();
        let header_line = lines.next().ok_or(RedactError::EmptyContent)?;
        let headers: Vec<&str> = header_line.split(self.delimiter).collect();
        let delimiter = self.delimiter.to_string();

        let mut processed = vec![header_line.to_string()];
        let mut rows = 0usize;

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let masked: Vec<&str> = headers
                .iter()
                .zip(line.split(self.delimiter))
                .map(|(header, value)| {
                    if self.sensitive_fields.contains(header) {
                        MASK_FIELD
                    } else {
                        value
                    }
                })
                .collect();
            processed.push(masked.join(&delimiter));
            rows += 1;
            if rows % 1000 == 0 {
                debug!(rows, "field pass progress");
            }
        }

        Ok((processed.join("\n"), rows))
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new()
    }
}
