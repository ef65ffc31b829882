//! Rule-based content redaction for regulated payment-card data.
//!
//! This crate is the pure core of the remediation pipeline: given raw
//! text, it applies an ordered table of pattern rules followed by a
//! field-aware tabular pass, and returns the redacted text. It performs
//! no I/O and holds no collaborator handles.
//!
//! # Key Properties
//!
//! - **Ordered rules**: each rule completes a global find-and-replace
//!   over the whole text before the next rule runs, so earlier masks
//!   shield their tokens from later rules.
//! - **Field-aware pass**: cells under sensitive column names are always
//!   masked, even when a pattern rule already rewrote them.
//! - **Pseudonymizing phone transform**: phone-shaped tokens become a
//!   deterministic SHA-256 digest rather than a destructive mask.
//!
//! # Example
//!
//! ```
//! use pci_redact::RedactionEngine;
//!
//! let engine = RedactionEngine::new();
//! let result = engine
//!     .redact("CustomerID,CreditCardNumber\n1,4111111111111111")
//!     .unwrap();
//! assert_eq!(
//!     result.redacted_text,
//!     "CustomerID,CreditCardNumber\n1,[REDACTED]"
//! );
//! ```

pub mod digest;
pub mod engine;
pub mod error;
pub mod fields;
pub mod rules;

pub use digest::phone_digest;
pub use engine::{RedactionEngine, RedactionResult, DEFAULT_DELIMITER, MASK_FIELD};
pub use error::{RedactError, Result};
pub use fields::{SensitiveFieldSet, PCI_FIELD_NAMES};
pub use rules::{default_rules, RedactionRule, Replacement, MASK_ADDRESS, MASK_CARD, MASK_EXPIRY};
