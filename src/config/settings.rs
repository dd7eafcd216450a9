//! User settings for soterrado
//!
//! Manages the creation-date format and the export file name.

use serde::{Deserialize, Serialize};

use super::paths::SoterradoPaths;
use crate::error::SoterradoError;

/// Date format used for the `Fecha` column by default
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// File name used for the spreadsheet export by default
pub const DEFAULT_EXPORT_FILE_NAME: &str = "reporte_soterrado.xlsx";

/// User settings for soterrado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// strftime format used to stamp new records
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// File name of the spreadsheet export, relative to the data directory;
    /// a `.csv` name selects CSV output
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SoterradoPaths) -> Result<Self, SoterradoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SoterradoError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SoterradoError::Json(format!(
                    "Failed to parse settings file {}: {}",
                    settings_path.display(),
                    e
                ))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SoterradoPaths) -> Result<(), SoterradoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SoterradoError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
