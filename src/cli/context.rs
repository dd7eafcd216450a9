//! Shared state for command handlers

use std::path::PathBuf;

use crate::config::{Settings, SoterradoPaths};
use crate::error::SoterradoResult;
use crate::services::RecordService;
use crate::storage::RecordStore;

/// Paths, settings and the record store of one run
pub struct Context {
    pub paths: SoterradoPaths,
    pub settings: Settings,
    pub store: RecordStore,
}

impl Context {
    /// Load settings and open the record store, creating the table if needed
    pub fn load(paths: SoterradoPaths) -> SoterradoResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        let store = RecordStore::open(&paths);
        store.initialize()?;

        Ok(Self {
            paths,
            settings,
            store,
        })
    }

    /// Record service over this context's store and settings
    pub fn service(&self) -> RecordService<'_> {
        RecordService::new(&self.store, &self.settings)
    }

    /// Default location of the spreadsheet export
    pub fn export_path(&self) -> PathBuf {
        self.paths.export_file(&self.settings.export_file_name)
    }
}
