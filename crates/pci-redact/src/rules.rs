//! The ordered pattern-rule table.
//!
//! Rules are compiled once and applied in table order over the entire raw
//! text; each rule finishes its global find-and-replace before the next
//! rule runs. Ordering is significant: a token consumed by an earlier
//! mask can no longer match a later rule (a card number masked by the
//! card rule never reaches the phone rule, even though 16 digits would
//! otherwise look phone-shaped).

use crate::digest::hashed_phone;
use crate::error::{RedactError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// Mask for card-number matches.
pub const MASK_CARD: &str = "[REDACTED CREDIT CARD]";
/// Mask for expiry-date matches.
pub const MASK_EXPIRY: &str = "[REDACTED EXPIRY]";
/// Mask for street-address matches.
pub const MASK_ADDRESS: &str = "[REDACTED ADDRESS]";

/// Replacement strategy for a rule.
#[derive(Clone, Copy, Debug)]
pub enum Replacement {
    /// Replace every match with a fixed mask.
    Literal(&'static str),
    /// Replace every match with text computed from the matched substring.
    Computed(fn(&str) -> String),
}

/// A pattern plus its replacement strategy.
#[derive(Clone, Debug)]
pub struct RedactionRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RedactionRule {
    /// Build a rule that replaces matches with a fixed mask.
    pub fn literal(name: &'static str, pattern: &str, mask: &'static str) -> Result<Self> {
        Ok(Self {
            name,
            pattern: compile(pattern)?,
            replacement: Replacement::Literal(mask),
        })
    }

    /// Build a rule that replaces matches with computed text.
    pub fn computed(name: &'static str, pattern: &str, f: fn(&str) -> String) -> Result<Self> {
        Ok(Self {
            name,
            pattern: compile(pattern)?,
            replacement: Replacement::Computed(f),
        })
    }

    /// Rule name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of matches in `text`.
    pub(crate) fn matches(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Apply the rule globally, returning the rewritten text.
    pub(crate) fn apply(&self, text: &str) -> String {
        match self.replacement {
            Replacement::Literal(mask) => self.pattern.replace_all(text, NoExpand(mask)).into_owned(),
            Replacement::Computed(f) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| f(&caps[0]))
                .into_owned(),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| RedactError::Pattern(e.to_string()))
}

/// The fixed PCI rule table, in evaluation order.
pub fn default_rules() -> &'static [RedactionRule] {
    static RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
        vec![
            // Major card-brand numbering patterns: Visa 13/16, Mastercard
            // 51-55, Amex 34/37, Discover 6011/65xx.
            RedactionRule::literal(
                "card_number",
                r"\b(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|6(?:011|5[0-9]{2})[0-9]{12})\b",
                MASK_CARD,
            )
            .unwrap(),
            // Expiry dates in MM/YY or MM/YYYY form.
            RedactionRule::literal(
                "expiry_date",
                r"\b(0[1-9]|1[0-2])/([0-9]{2}|[0-9]{4})\b",
                MASK_EXPIRY,
            )
            .unwrap(),
            // Leading number, words, recognized street-suffix word.
            RedactionRule::literal(
                "street_address",
                r"\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
                MASK_ADDRESS,
            )
            .unwrap(),
            // Runs of 7-16 digit groups with optional separators and a
            // leading +. Pseudonymized, not masked.
            RedactionRule::computed("phone_number", r"\+?(?:\d[\s\-.()]?){7,15}\d", hashed_phone)
                .unwrap(),
        ]
    });
    &RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_rule(name: &str, text: &str) -> String {
        let rule = default_rules().iter().find(|r| r.name() == name).unwrap();
        rule.apply(text)
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["card_number", "expiry_date", "street_address", "phone_number"]
        );
    }

    #[test]
    fn test_visa_16_digit() {
        assert_eq!(apply_rule("card_number", "4111111111111111"), MASK_CARD);
    }

    #[test]
    fn test_visa_13_digit() {
        assert_eq!(apply_rule("card_number", "4111111111111"), MASK_CARD);
    }

    #[test]
    fn test_mastercard() {
        assert_eq!(apply_rule("card_number", "5500005555555559"), MASK_CARD);
    }

    #[test]
    fn test_amex() {
        assert_eq!(apply_rule("card_number", "371449635398431"), MASK_CARD);
    }

    #[test]
    fn test_discover() {
        assert_eq!(apply_rule("card_number", "6011000990139424"), MASK_CARD);
    }

    #[test]
    fn test_non_card_digits_pass() {
        // Wrong prefix for any brand pattern.
        assert_eq!(apply_rule("card_number", "9999888877776666"), "9999888877776666");
    }

    #[test]
    fn test_expiry_two_digit_year() {
        assert_eq!(apply_rule("expiry_date", "exp 12/26"), format!("exp {}", MASK_EXPIRY));
    }

    #[test]
    fn test_expiry_four_digit_year() {
        assert_eq!(apply_rule("expiry_date", "03/2027"), MASK_EXPIRY);
    }

    #[test]
    fn test_expiry_rejects_month_13() {
        assert_eq!(apply_rule("expiry_date", "13/26"), "13/26");
    }

    #[test]
    fn test_street_address() {
        assert_eq!(
            apply_rule("street_address", "ships to 123 Main Street today"),
            format!("ships to {} today", MASK_ADDRESS)
        );
    }

    #[test]
    fn test_street_address_abbreviated_suffix() {
        assert_eq!(apply_rule("street_address", "42 Elm Ave"), MASK_ADDRESS);
    }

    #[test]
    fn test_phone_is_hashed_not_masked() {
        let out = apply_rule("phone_number", "call 555-123-4567 now");
        assert!(out.contains("[HASHED PHONE: "));
        assert!(!out.contains("555-123-4567"));
    }

    #[test]
    fn test_phone_international_format() {
        let out = apply_rule("phone_number", "+44 20 7946 0958");
        assert!(out.starts_with("[HASHED PHONE: "));
    }

    #[test]
    fn test_invalid_custom_pattern_is_an_error() {
        let err = RedactionRule::literal("broken", r"(unclosed", "[X]").unwrap_err();
        assert!(matches!(err, RedactError::Pattern(_)));
    }

    #[test]
    fn test_literal_mask_is_not_expanded() {
        // Masks containing $ must be taken verbatim.
        let rule = RedactionRule::literal("dollar", r"\d+", "[$0 GONE]").unwrap();
        assert_eq!(rule.apply("pay 42"), "pay [$0 GONE]");
    }
}
