//! Integration tests for pci-redact.
//!
//! These verify the observable properties of the engine as a whole:
//! - field rules, not pattern rules, govern sensitive CSV cells
//! - raw card numbers, expiry dates, and addresses never leak through
//! - the phone digest is deterministic and correlatable
//! - empty content is rejected

use pci_redact::{phone_digest, RedactError, RedactionEngine};

/// Raw values that must NEVER appear in redacted output.
const CANARY_VALUES: &[&str] = &[
    "4111111111111111",
    "5500005555555559",
    "371449635398431",
    "6011000990139424",
    "12/26",
    "09/2027",
    "123 Main Street",
    "555-123-4567",
];

#[test]
fn test_field_rule_governs_sensitive_cells() {
    let engine = RedactionEngine::new();
    let result = engine
        .redact("CustomerID,CreditCardNumber,Phone\n1,4111111111111111,555-123-4567")
        .unwrap();

    let mut lines = result.redacted_text.lines();
    let header = lines.next().unwrap();
    let row = lines.next().unwrap();
    assert_eq!(header, "CustomerID,CreditCardNumber,Phone");

    let cells: Vec<&str> = row.split(',').collect();
    assert_eq!(cells[0], "1");
    // The pattern pass turned the card number into its pattern mask, but
    // the field pass overwrote the whole cell because the column matches.
    assert_eq!(cells[1], "[REDACTED]");
    assert_ne!(cells[1], "[REDACTED CREDIT CARD]");
    // Phone is not a sensitive column, so the cell keeps its digest.
    assert!(cells[2].starts_with("[HASHED PHONE: "));
}

#[test]
fn test_phone_cell_carries_a_64_hex_digest() {
    let engine = RedactionEngine::new();
    let result = engine
        .redact("CustomerID,Phone\n1,555-123-4567")
        .unwrap();

    let row = result.redacted_text.lines().nth(1).unwrap();
    let digest = row
        .strip_prefix("1,[HASHED PHONE: ")
        .and_then(|s| s.strip_suffix(']'))
        .unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(digest, phone_digest("555-123-4567"));
}

#[test]
fn test_same_phone_number_correlates_across_objects() {
    let engine = RedactionEngine::new();
    let a = engine.redact("Phone\n555-123-4567").unwrap();
    let b = engine.redact("Contact\nreach me at 555-123-4567").unwrap();

    let digest = format!("[HASHED PHONE: {}]", phone_digest("555-123-4567"));
    assert!(a.redacted_text.contains(&digest));
    assert!(b.redacted_text.contains(&digest));
}

#[test]
fn test_canary_values_never_leak() {
    let engine = RedactionEngine::new();
    let body = format!(
        "Notes\ncard {} backup {} amex {} disc {} exp 12/26 alt 09/2027 at 123 Main Street call 555-123-4567",
        CANARY_VALUES[0], CANARY_VALUES[1], CANARY_VALUES[2], CANARY_VALUES[3]
    );
    let result = engine.redact(&body).unwrap();

    for canary in CANARY_VALUES {
        assert!(
            !result.redacted_text.contains(canary),
            "canary '{}' leaked in output: {}",
            canary,
            result.redacted_text
        );
    }
}

#[test]
fn test_literal_masks_discard_the_original_value() {
    let engine = RedactionEngine::new();
    let result = engine.redact("Notes\n4111111111111111").unwrap();
    // Nothing in the output allows recovering the card number.
    assert!(result.redacted_text.contains("[REDACTED CREDIT CARD]"));
    assert!(!result.redacted_text.contains("4111"));
}

#[test]
fn test_empty_input_is_a_content_error() {
    let engine = RedactionEngine::new();
    assert_eq!(engine.redact("").unwrap_err(), RedactError::EmptyContent);
}

#[test]
fn test_row_count_reported_for_large_input() {
    let engine = RedactionEngine::new();
    let mut body = String::from("CustomerID,CreditCardNumber");
    for i in 0..2500 {
        body.push_str(&format!("\n{},4111111111111111", i));
    }
    let result = engine.redact(&body).unwrap();
    assert_eq!(result.rows_processed, 2500);
    assert_eq!(result.redacted_text.lines().count(), 2501);
}
