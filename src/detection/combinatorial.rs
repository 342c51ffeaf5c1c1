//! Combinatorial PII detection
//!
//! Individually innocuous quasi-identifiers (a full name, an email, a street
//! address, a device or network identifier) become re-identifying when several
//! occur in the same record. Each signal is a pure predicate over the record
//! mapping, keyed by field name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of signals that must fire before a record is flagged
pub const DEFAULT_COMBINATION_THRESHOLD: usize = 2;

/// Substrings that mark an address field as a street address
pub const ADDRESS_KEYWORDS: [&str; 5] = ["road", "street", "lane", "avenue", "nagar"];

/// Quasi-identifying signal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// `name` holds a multi-token full name
    Name,
    /// `email` holds something with an `@`
    Email,
    /// `address` mentions a street-level keyword
    Address,
    /// `device_id` or `ip_address` is present
    DeviceIp,
}

impl Signal {
    /// All signals
    pub const ALL: [Signal; 4] = [Self::Name, Self::Email, Self::Address, Self::DeviceIp];

    /// Evaluate this signal against a record
    pub fn is_present(&self, record: &Map<String, Value>) -> bool {
        match self {
            Self::Name => string_field(record, "name").is_some_and(|v| {
                v.contains(' ') && v.split_whitespace().take(2).count() >= 2
            }),
            Self::Email => string_field(record, "email").is_some_and(|v| v.contains('@')),
            Self::Address => string_field(record, "address").is_some_and(|v| {
                let lower = v.to_lowercase();
                ADDRESS_KEYWORDS.iter().any(|kw| lower.contains(kw))
            }),
            Self::DeviceIp => record.contains_key("device_id") || record.contains_key("ip_address"),
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Self::Name => 1,
            Self::Email => 1 << 1,
            Self::Address => 1 << 2,
            Self::DeviceIp => 1 << 3,
        }
    }
}

/// Per-record set of fired signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSet(u8);

impl SignalSet {
    /// Evaluate every signal against a record
    pub fn evaluate(record: &Map<String, Value>) -> Self {
        let mut set = Self::default();
        for signal in Signal::ALL {
            if signal.is_present(record) {
                set.insert(signal);
            }
        }
        set
    }

    /// Mark a signal as fired
    pub fn insert(&mut self, signal: Signal) {
        self.0 |= signal.bit();
    }

    /// Check whether a signal fired
    pub fn contains(&self, signal: Signal) -> bool {
        self.0 & signal.bit() != 0
    }

    /// Number of fired signals
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Fired signals, in declaration order
    pub fn signals(&self) -> Vec<Signal> {
        Signal::ALL
            .into_iter()
            .filter(|s| self.contains(*s))
            .collect()
    }
}

/// Detector applying a threshold policy over the signal set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinatorialDetector {
    threshold: usize,
}

impl CombinatorialDetector {
    /// Create a detector with the given signal threshold
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Check whether the combination of fields constitutes PII
    pub fn detect(&self, record: &Map<String, Value>) -> bool {
        SignalSet::evaluate(record).count() >= self.threshold
    }
}

impl Default for CombinatorialDetector {
    fn default() -> Self {
        Self::new(DEFAULT_COMBINATION_THRESHOLD)
    }
}

fn string_field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}
