//! Standalone PII detection
//!
//! Decides whether a single value, independent of the field it came from,
//! contains a recognizable sensitive token.

use crate::detection::models::PiiCategory;
use crate::detection::patterns::PatternSet;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Pattern-based detector for single values
#[derive(Debug, Clone)]
pub struct StandaloneDetector {
    patterns: Arc<PatternSet>,
}

impl StandaloneDetector {
    /// Create a detector over a shared pattern set
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    /// Check whether `text` contains any recognizable PII token
    pub fn detect(&self, text: &str) -> bool {
        self.patterns
            .all_patterns()
            .iter()
            .any(|p| p.regex.is_match(text))
    }

    /// Check a JSON value after coercing it to text
    ///
    /// Numbers are tested against their decimal form, so a phone number
    /// stored as an integer is still detected.
    pub fn detect_value(&self, value: &Value) -> bool {
        self.detect(&value_text(value))
    }

    /// List every category whose grammar matches `text`
    pub fn categories(&self, text: &str) -> Vec<PiiCategory> {
        self.patterns
            .all_patterns()
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.category)
            .collect()
    }
}

/// Textual form of a JSON value used for matching
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn detector() -> StandaloneDetector {
        StandaloneDetector::new(Arc::new(PatternSet::new().unwrap()))
    }

    #[test_case("9876543210", true ; "ten digit phone")]
    #[test_case("call me on 9876543210 today", true ; "phone inside text")]
    #[test_case("987654321", false ; "nine digits")]
    #[test_case("98765432101", false ; "eleven digits")]
    #[test_case("123456789012", true ; "twelve digit aadhar")]
    #[test_case("1234567890123", false ; "thirteen digits")]
    #[test_case("A1234567", true ; "passport")]
    #[test_case("AB1234567", false ; "passport with two letters")]
    #[test_case("alice@bank.com", true ; "email shaped handle")]
    #[test_case("9876543210@upi", true ; "numeric upi handle")]
    #[test_case("alice@bank", false ; "handle without tld")]
    #[test_case("Pune", false ; "plain word")]
    #[test_case("", false ; "empty string")]
    fn test_detect(text: &str, expected: bool) {
        assert_eq!(detector().detect(text), expected);
    }

    #[test]
    fn test_twelve_digits_do_not_trigger_phone() {
        let categories = detector().categories("123456789012");
        assert_eq!(categories, vec![PiiCategory::Aadhar]);
    }

    #[test]
    fn test_multiple_categories() {
        let categories = detector().categories("9876543210@upi");
        assert!(categories.contains(&PiiCategory::Phone));
        assert!(categories.contains(&PiiCategory::Upi));
    }

    #[test]
    fn test_detect_numeric_value() {
        let d = detector();
        assert!(d.detect_value(&json!(9876543210_i64)));
        assert!(!d.detect_value(&json!(42)));
        assert!(!d.detect_value(&json!(true)));
        assert!(!d.detect_value(&Value::Null));
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(12)), "12");
        assert_eq!(value_text(&json!(false)), "false");
        assert_eq!(value_text(&Value::Null), "null");
    }
}
