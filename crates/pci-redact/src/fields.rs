//! Sensitive column names for tabular redaction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column names whose tabular values are always masked, regardless of
/// whether the pattern pass already touched them. Matching is exact and
/// case-sensitive.
pub const PCI_FIELD_NAMES: &[&str] = &[
    "CreditCardNumber",
    "CardNumber",
    "CCNumber",
    "ExpirationDate",
    "ExpiryDate",
    "Expiry",
    "Expiration",
];

/// A set of case-sensitive column names used by the tabular field pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitiveFieldSet {
    names: BTreeSet<String>,
}

impl SensitiveFieldSet {
    /// Build a set from arbitrary column names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The default PCI field set.
    pub fn pci_default() -> Self {
        Self::new(PCI_FIELD_NAMES.iter().copied())
    }

    /// Whether `column` is a sensitive field (exact, case-sensitive).
    pub fn contains(&self, column: &str) -> bool {
        self.names.contains(column)
    }

    /// Number of column names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for SensitiveFieldSet {
    fn default() -> Self {
        Self::pci_default()
    }
}
