//! Meters type for representing undergrounded cable length
//!
//! Internally stores lengths in centimeters (i64) so that values read back from
//! the table compare by value rather than by their textual form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A length in meters stored as centimeters (hundredths of a meter)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Meters(i64);

impl Meters {
    /// Create a length from centimeters
    ///
    /// # Examples
    /// ```
    /// use soterrado::models::Meters;
    /// let length = Meters::from_centimeters(1050); // 10.5 m
    /// assert_eq!(length.to_string(), "10.5");
    /// ```
    pub const fn from_centimeters(centimeters: i64) -> Self {
        Self(centimeters)
    }

    /// Create a length from whole meters
    pub const fn from_whole(meters: i64) -> Self {
        Self(meters.saturating_mul(100))
    }

    /// Get the length in centimeters
    pub const fn centimeters(&self) -> i64 {
        self.0
    }

    /// Check if the length is strictly positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The length in meters as a float, for spreadsheet cells
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a length from a string
    ///
    /// Accepts formats: "10", "10.5", "10.25", "-3", " 7.0 ". At most two
    /// decimal places are allowed.
    pub fn parse(s: &str) -> Result<Self, MetersParseError> {
        Self::parse_with(s, false)
    }

    /// Parse a stored length, rounding past two decimals
    ///
    /// Tables written by older tools may hold values such as `12.345`; those
    /// round half away from zero to the nearest centimeter.
    pub fn parse_rounded(s: &str) -> Result<Self, MetersParseError> {
        Self::parse_with(s, true)
    }

    fn parse_with(s: &str, round: bool) -> Result<Self, MetersParseError> {
        let trimmed = s.trim();
        let invalid = || MetersParseError::InvalidFormat(s.to_string());

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole_str, frac_str) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if !whole_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_str.len() > 2 && !round {
            return Err(MetersParseError::TooPrecise(s.to_string()));
        }

        let (cents_str, rest) = frac_str.split_at(frac_str.len().min(2));
        let round_up = rest.bytes().next().is_some_and(|b| b >= b'5');

        let whole: i64 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| invalid())?
        };

        let frac: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let centimeters = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .and_then(|c| c.checked_add(i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -centimeters } else { centimeters }))
    }
}

impl fmt::Display for Meters {
    /// Formats with at least one decimal digit: `10.0`, `10.5`, `10.25`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;

        if frac % 10 == 0 {
            write!(f, "{}{}.{}", sign, whole, frac / 10)
        } else {
            write!(f, "{}{}.{:02}", sign, whole, frac)
        }
    }
}

/// Saturates at the largest representable length instead of overflowing
impl std::ops::Add for Meters {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::iter::Sum for Meters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Meters::default(), |acc, m| acc + m)
    }
}

/// Error type for meters parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetersParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for MetersParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetersParseError::InvalidFormat(s) => write!(f, "Invalid meters value: {}", s),
            MetersParseError::TooPrecise(s) => {
                write!(f, "Meters value has more than two decimals: {}", s)
            }
        }
    }
}

impl std::error::Error for MetersParseError {}
