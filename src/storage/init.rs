//! Storage initialization
//!
//! Handles first-run setup of the data directory and the record table.

use crate::config::paths::SoterradoPaths;
use crate::error::SoterradoError;

use super::file_io::create_table_if_missing;

/// Initialize storage for a fresh installation
///
/// Creates the data directory and an empty record table. Existing data is
/// left untouched.
pub fn initialize_storage(paths: &SoterradoPaths) -> Result<(), SoterradoError> {
    paths.ensure_directories()?;
    create_table_if_missing(paths.table_file())?;
    Ok(())
}
