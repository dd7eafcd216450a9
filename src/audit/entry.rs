//! Audit entry data structures
//!
//! Defines the severity levels and the line format of the modification log.

use chrono::{DateTime, Local};
use std::fmt;

/// Timestamp format of audit lines (`2024-05-01 09:30:12,345`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    /// A record was changed
    Info,
    /// A modification request was rejected
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "INFO"),
            AuditLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// When the entry was produced (local time)
    pub timestamp: DateTime<Local>,

    pub level: AuditLevel,

    /// Human-readable description
    pub message: String,
}

impl AuditEntry {
    /// Create an INFO entry stamped now
    pub fn info(message: impl Into<String>) -> Self {
        Self::at(Local::now(), AuditLevel::Info, message)
    }

    /// Create an ERROR entry stamped now
    pub fn error(message: impl Into<String>) -> Self {
        Self::at(Local::now(), AuditLevel::Error, message)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(timestamp: DateTime<Local>, level: AuditLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
        }
    }

    /// Format as a log line: `<timestamp> - <LEVEL> - <message>`
    ///
    /// Control characters and line separators in the message are escaped, so
    /// an entry always occupies exactly one line.
    pub fn format_line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            escape_line_breaks(&self.message)
        )
    }
}

fn escape_line_breaks(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    escaped
}
