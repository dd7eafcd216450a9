//! Storage layer for soterrado
//!
//! Provides the CSV-backed record store with append-only inserts, atomic
//! whole-table rewrites for updates and an audit trail of modifications.

pub mod file_io;
pub mod init;
pub mod records;

pub use file_io::{
    append_row, create_table_if_missing, read_rows, read_table, write_rows_atomic, TableRow,
};
pub use init::initialize_storage;
pub use records::{next_id_for, RecordStore, UpdateOutcome};
