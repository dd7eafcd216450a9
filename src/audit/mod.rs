//! Audit logging system for soterrado
//!
//! Records every effective record modification, and every rejected
//! modification with a malformed ID, in an append-only text log.
//!
//! # Architecture
//!
//! - `AuditEntry`: timestamp, level and message of one log line.
//! - `AuditLogger`: writes entries through an `AuditSink` (file or memory).
//! - `describe_changes`: builds the `ID <n>: <field> [<old> -> <new>]; ...`
//!   message for an update.
//!
//! # Example
//!
//! ```rust,ignore
//! use soterrado::audit::{describe_changes, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! if let Some(message) = describe_changes(record.id, &changes) {
//!     logger.info(message)?;
//! }
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{describe_changes, describe_malformed_id};
pub use entry::{AuditEntry, AuditLevel, TIMESTAMP_FORMAT};
pub use logger::{AuditLogger, AuditSink, FileSink, MemorySink};
