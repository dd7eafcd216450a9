//! Record identifier
//!
//! IDs are positive integers assigned by the record store. They are compared
//! by integer value, so `"007"` and `"7"` name the same record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a record in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The ID handed out when the table holds no parseable IDs
    pub const FIRST: RecordId = RecordId(1);

    /// Create an ID from its numeric value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The ID following this one, or `None` if this is the largest ID
    pub const fn checked_next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Parse an ID, tolerating surrounding whitespace
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_value() {
        assert_eq!(RecordId::parse("7").unwrap(), RecordId::new(7));
        assert_eq!(RecordId::parse("007").unwrap(), RecordId::new(7));
        assert_eq!(RecordId::parse(" 12 ").unwrap(), RecordId::new(12));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(RecordId::parse("abc").is_err());
        assert!(RecordId::parse("").is_err());
        assert!(RecordId::parse("-1").is_err());
        assert!(RecordId::parse("1.5").is_err());
    }

    #[test]
    fn test_next_and_display() {
        assert_eq!(RecordId::FIRST.checked_next().unwrap().to_string(), "2");
    }

    #[test]
    fn test_no_id_after_largest() {
        assert_eq!(RecordId::new(u64::MAX).checked_next(), None);
    }
}
