//! One-way digest for phone-number pseudonymization.
//!
//! Phone numbers are not destructively masked like card numbers: they are
//! replaced with a deterministic SHA-256 digest of the exact matched
//! substring. The same number always maps to the same digest, so
//! occurrences can be correlated across objects without disclosing the
//! number itself. The digest is unkeyed and unsalted; swapping in a keyed
//! HMAC only requires changing `phone_digest`.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest (64 chars) of the exact matched substring.
pub fn phone_digest(matched: &str) -> String {
    hex::encode(Sha256::digest(matched.as_bytes()))
}

/// Replacement text for the phone rule.
pub(crate) fn hashed_phone(matched: &str) -> String {
    format!("[HASHED PHONE: {}]", phone_digest(matched))
}
