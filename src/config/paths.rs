//! Path management for soterrado
//!
//! All files (record table, audit log, settings, export report) live in a
//! single data directory.
//!
//! ## Path Resolution Order
//!
//! 1. `SOTERRADO_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!    (`~/.local/share/soterrado` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::SoterradoError;

/// File name of the record table
pub const TABLE_FILE_NAME: &str = "registros.csv";

/// File name of the modification audit log
pub const AUDIT_LOG_FILE_NAME: &str = "modificaciones.log";

/// Manages all paths used by soterrado
#[derive(Debug, Clone)]
pub struct SoterradoPaths {
    base_dir: PathBuf,
}

impl SoterradoPaths {
    /// Create a new SoterradoPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined.
    pub fn new() -> Result<Self, SoterradoError> {
        let base_dir = if let Ok(custom) = std::env::var("SOTERRADO_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SoterradoPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the record table
    pub fn table_file(&self) -> PathBuf {
        self.base_dir.join(TABLE_FILE_NAME)
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join(AUDIT_LOG_FILE_NAME)
    }

    /// Get the path of an export file with the given name
    pub fn export_file(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<(), SoterradoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SoterradoError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Check if soterrado has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SoterradoError> {
    ProjectDirs::from("", "", "soterrado")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SoterradoError::Config("Could not determine a data directory".into()))
}
