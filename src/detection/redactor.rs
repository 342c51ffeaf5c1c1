//! Field-specific masking
//!
//! Masking is driven by a table mapping field names to a [`MaskRule`]. A rule
//! only fires when the value matches the grammar the rule expects; otherwise
//! the value passes through unchanged. Masking is cosmetic: it keeps a little
//! context (first characters, last digits, domain) for operational use.
//!
//! Redaction is not idempotent. Re-running a rule over an already-masked value
//! may mask it again differently, and nothing here relies on a fixpoint.

use crate::detection::models::PiiCategory;
use crate::detection::patterns::PatternSet;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

const SHORT_MASK: &str = "XXX";
const MIDDLE_MASK: &str = "XXXXXX";
const PASSPORT_MASK: &str = "XXXXXXX";
const AADHAR_PREFIX: &str = "XXXX XXXX ";
const ADDRESS_PLACEHOLDER: &str = "[REDACTED_ADDRESS]";

/// Masking strategy for one kind of field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskRule {
    /// Keep the first two and last two characters
    Phone,
    /// Keep only the last four characters behind a fixed prefix
    Aadhar,
    /// Keep the first character
    Passport,
    /// Mask the local part of a handle, keep the domain
    PaymentHandle,
    /// Reduce to initials
    FullName,
    /// Mask the local part of an address, keep the domain
    Email,
    /// Replace with a placeholder, keeping any postal code
    Address,
}

impl MaskRule {
    /// Apply the rule, returning `None` when the value doesn't meet the
    /// rule's precondition
    pub fn apply(&self, value: &str, patterns: &PatternSet) -> Option<String> {
        match self {
            Self::Phone => patterns
                .matches(PiiCategory::Phone, value)
                .then(|| format!("{}{MIDDLE_MASK}{}", head(value, 2), tail(value, 2))),
            Self::Aadhar => patterns
                .matches(PiiCategory::Aadhar, value)
                .then(|| format!("{AADHAR_PREFIX}{}", tail(value, 4))),
            Self::Passport => patterns
                .matches(PiiCategory::Passport, value)
                .then(|| format!("{}{PASSPORT_MASK}", head(value, 1))),
            Self::PaymentHandle => {
                if !patterns.matches(PiiCategory::Upi, value) {
                    return None;
                }
                Some(match value.split_once('@') {
                    Some((local, domain)) => mask_local_part(local, domain),
                    None => format!("{}{MIDDLE_MASK}{}", head(value, 2), tail(value, 4)),
                })
            }
            Self::FullName => {
                if !value.contains(' ') {
                    return None;
                }
                let mut parts = value.split_whitespace();
                let first = parts.next()?;
                let last = parts.last().unwrap_or(first);
                Some(format!(
                    "{}{SHORT_MASK} {}{SHORT_MASK}",
                    head(first, 1),
                    head(last, 1)
                ))
            }
            Self::Email => value
                .split_once('@')
                .map(|(local, domain)| mask_local_part(local, domain)),
            Self::Address => Some(match patterns.find_postal_code(value) {
                Some(pin) => format!("{ADDRESS_PLACEHOLDER}, {pin}"),
                None => ADDRESS_PLACEHOLDER.to_string(),
            }),
        }
    }
}

/// Built-in field name to rule table
pub fn default_rules() -> HashMap<String, MaskRule> {
    [
        ("phone", MaskRule::Phone),
        ("aadhar", MaskRule::Aadhar),
        ("passport", MaskRule::Passport),
        ("upi_id", MaskRule::PaymentHandle),
        ("name", MaskRule::FullName),
        ("email", MaskRule::Email),
        ("address", MaskRule::Address),
    ]
    .into_iter()
    .map(|(field, rule)| (field.to_string(), rule))
    .collect()
}

/// Redactor dispatching on exact field name
#[derive(Debug, Clone)]
pub struct FieldRedactor {
    patterns: Arc<PatternSet>,
    rules: HashMap<String, MaskRule>,
}

impl FieldRedactor {
    /// Create a redactor with the built-in rule table
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self::with_rules(patterns, default_rules())
    }

    /// Create a redactor with a custom rule table
    pub fn with_rules(patterns: Arc<PatternSet>, rules: HashMap<String, MaskRule>) -> Self {
        Self { patterns, rules }
    }

    /// Get the rule registered for a field name
    pub fn rule_for(&self, field: &str) -> Option<MaskRule> {
        self.rules.get(field).copied()
    }

    /// Return the masked replacement for a field value
    ///
    /// Non-string values, fields without a rule and values failing the
    /// rule's precondition are returned unchanged.
    pub fn redact_value(&self, field: &str, value: &Value) -> Value {
        let (Some(rule), Value::String(text)) = (self.rule_for(field), value) else {
            return value.clone();
        };

        match rule.apply(text, &self.patterns) {
            Some(masked) => Value::String(masked),
            None => value.clone(),
        }
    }
}

fn mask_local_part(local: &str, domain: &str) -> String {
    format!("{}{SHORT_MASK}@{domain}", head(local, 2))
}

/// First `n` characters of `s`
fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Last `n` characters of `s`
fn tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn redactor() -> FieldRedactor {
        FieldRedactor::new(Arc::new(PatternSet::new().unwrap()))
    }

    fn redact(field: &str, value: &str) -> String {
        match redactor().redact_value(field, &json!(value)) {
            Value::String(s) => s,
            other => panic!("expected string, got {other}"),
        }
    }

    #[test_case("phone", "9876543210", "98XXXXXX10" ; "phone")]
    #[test_case("phone", "+91 9876543210", "+9XXXXXX10" ; "phone with prefix")]
    #[test_case("aadhar", "123456789012", "XXXX XXXX 9012" ; "aadhar")]
    #[test_case("passport", "A1234567", "AXXXXXXX" ; "passport")]
    #[test_case("upi_id", "alice@bank.com", "alXXX@bank.com" ; "upi email shaped")]
    #[test_case("upi_id", "9876543210@upi", "98XXX@upi" ; "upi numeric")]
    #[test_case("name", "John Smith", "JXXX SXXX" ; "two token name")]
    #[test_case("name", "Mary Ann Jones", "MXXX JXXX" ; "middle token dropped")]
    #[test_case("email", "jane.doe@example.com", "jaXXX@example.com" ; "email")]
    #[test_case("address", "12 MG Road, Bangalore 560001", "[REDACTED_ADDRESS], 560001" ; "address with pin")]
    #[test_case("address", "12 MG Road, Bangalore", "[REDACTED_ADDRESS]" ; "address without pin")]
    fn test_masking(field: &str, input: &str, expected: &str) {
        assert_eq!(redact(field, input), expected);
    }

    #[test_case("phone", "12345" ; "phone without ten digits")]
    #[test_case("aadhar", "1234 5678 9012" ; "spaced aadhar")]
    #[test_case("passport", "a1234567" ; "lowercase passport")]
    #[test_case("upi_id", "alice@bank" ; "handle without tld")]
    #[test_case("name", "Cher" ; "single token name")]
    #[test_case("email", "not-an-email" ; "email without at")]
    #[test_case("city", "9876543210" ; "field without rule")]
    #[test_case("Phone", "9876543210" ; "field names are case sensitive")]
    fn test_pass_through(field: &str, input: &str) {
        assert_eq!(redact(field, input), input);
    }

    #[test]
    fn test_phone_reconstruction() {
        let value = "call 9876543210";
        let masked = redact("phone", value);
        let expected = format!("{}XXXXXX{}", &value[..2], &value[value.len() - 2..]);
        assert_eq!(masked, expected);
    }

    #[test]
    fn test_whitespace_only_name_passes_through() {
        assert_eq!(redact("name", "   "), "   ");
    }

    #[test]
    fn test_non_string_values_unchanged() {
        let r = redactor();
        assert_eq!(r.redact_value("phone", &json!(9876543210_i64)), json!(9876543210_i64));
        assert_eq!(r.redact_value("address", &Value::Null), Value::Null);
        assert_eq!(r.redact_value("name", &json!(true)), json!(true));
    }

    #[test]
    fn test_device_fields_have_no_rule() {
        let r = redactor();
        assert!(r.rule_for("device_id").is_none());
        assert!(r.rule_for("ip_address").is_none());
        assert_eq!(
            r.redact_value("ip_address", &json!("10.0.0.1")),
            json!("10.0.0.1")
        );
    }

    #[test]
    fn test_custom_rule_table() {
        let mut rules = default_rules();
        rules.insert("mobile".to_string(), MaskRule::Phone);
        let r = FieldRedactor::with_rules(Arc::new(PatternSet::new().unwrap()), rules);
        assert_eq!(
            r.redact_value("mobile", &json!("9876543210")),
            json!("98XXXXXX10")
        );
    }

    #[test]
    fn test_head_and_tail_are_char_based() {
        assert_eq!(head("Ärzte", 2), "Är");
        assert_eq!(tail("Ärzte", 2), "te");
        assert_eq!(head("a", 2), "a");
        assert_eq!(tail("a", 4), "a");
        assert_eq!(tail("abc", 0), "");
    }
}
