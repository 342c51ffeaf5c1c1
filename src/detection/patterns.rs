//! Compiled token grammars for PII detection
//!
//! The pattern set is built once at startup and shared read-only by every
//! classification call. Nothing in it is mutable after construction.

use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use regex::Regex;

/// Built-in grammar for each standalone category
///
/// All patterns are unanchored substring searches with word boundaries.
const CATEGORY_PATTERNS: [(PiiCategory, &str); 4] = [
    (PiiCategory::Phone, r"\b\d{10}\b"),
    (PiiCategory::Aadhar, r"\b\d{12}\b"),
    (PiiCategory::Passport, r"\b[A-Z]\d{7}\b"),
    (
        PiiCategory::Upi,
        r"\b[\w.-]+@[\w.-]+\.\w+\b|\b\d{10}@\w+\b",
    ),
];

/// Six-digit postal code, used by the address mask
const POSTAL_CODE_PATTERN: &str = r"\b\d{6}\b";

/// Compiled pattern with its category
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub category: PiiCategory,
}

/// Immutable set of compiled grammars
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
    postal_code: Regex,
}

impl PatternSet {
    /// Compile the built-in pattern set
    pub fn new() -> Result<Self> {
        let patterns = CATEGORY_PATTERNS
            .iter()
            .map(|(category, pattern)| {
                let regex = Regex::new(pattern).with_context(|| {
                    format!("Invalid regex for category '{}': {pattern}", category.label())
                })?;
                Ok(CompiledPattern {
                    regex,
                    category: *category,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let postal_code = Regex::new(POSTAL_CODE_PATTERN)
            .context("Invalid regex for postal code pattern")?;

        Ok(Self {
            patterns,
            postal_code,
        })
    }

    /// Get all category patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get the pattern for a specific category
    pub fn pattern_for(&self, category: PiiCategory) -> &Regex {
        &self.patterns[Self::slot(category)].regex
    }

    /// Position of a category in `CATEGORY_PATTERNS`
    fn slot(category: PiiCategory) -> usize {
        match category {
            PiiCategory::Phone => 0,
            PiiCategory::Aadhar => 1,
            PiiCategory::Passport => 2,
            PiiCategory::Upi => 3,
        }
    }

    /// Check whether `text` contains a token of the given category
    pub fn matches(&self, category: PiiCategory, text: &str) -> bool {
        self.pattern_for(category).is_match(text)
    }

    /// Find the first six-digit postal code in `text`
    pub fn find_postal_code<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.postal_code.find(text).map(|m| m.as_str())
    }
}
