//! Record identifier type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record identifier newtype wrapper
///
/// Identifies one row of the input table. Identifiers are integers and are
/// carried through to the output unchanged.
///
/// # Examples
///
/// ```
/// use pii_redactor::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let id = RecordId::from_str(" 42 ").unwrap();
/// assert_eq!(id.value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(i64);

impl RecordId {
    /// Creates a new RecordId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid record ID '{s}': {e}"))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
