//! Audit logger for the append-only modification log
//!
//! The logger is an explicit object handed to the record store. Where lines end
//! up is decided by its [`AuditSink`]: a file in production, memory in tests.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{SoterradoError, SoterradoResult};

use super::entry::AuditEntry;

/// Destination for formatted audit lines
pub trait AuditSink: Send + Sync {
    /// Append one line (without trailing newline)
    fn write_line(&self, line: &str) -> SoterradoResult<()>;
}

/// Appends lines to a file, opening it per write
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileSink {
    fn write_line(&self, line: &str) -> SoterradoResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SoterradoError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .map_err(|e| SoterradoError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| SoterradoError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }
}

/// Keeps lines in a shared buffer; clones see the same lines
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemorySink {
    fn write_line(&self, line: &str) -> SoterradoResult<()> {
        let mut lines = self.lines.lock().map_err(|e| {
            SoterradoError::Storage(format!("Failed to acquire audit buffer lock: {}", e))
        })?;
        lines.push(line.to_string());
        Ok(())
    }
}

/// Writes audit entries to a sink
pub struct AuditLogger {
    sink: Box<dyn AuditSink>,
}

impl AuditLogger {
    /// Create a logger appending to the file at `log_path`
    pub fn new(log_path: PathBuf) -> Self {
        Self::with_sink(FileSink::new(log_path))
    }

    /// Create a logger writing to an arbitrary sink
    pub fn with_sink(sink: impl AuditSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Log an audit entry
    pub fn log(&self, entry: &AuditEntry) -> SoterradoResult<()> {
        self.sink.write_line(&entry.format_line())
    }

    /// Log an INFO entry stamped now
    pub fn info(&self, message: impl Into<String>) -> SoterradoResult<()> {
        self.log(&AuditEntry::info(message))
    }

    /// Log an ERROR entry stamped now
    pub fn error(&self, message: impl Into<String>) -> SoterradoResult<()> {
        self.log(&AuditEntry::error(message))
    }
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger").finish_non_exhaustive()
    }
}
