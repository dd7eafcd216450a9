//! soterrado - Terminal log of undergrounding work
//!
//! This library records undergrounding (cable-laying) tasks in a CSV table:
//! meters completed, technician, location and supervision. Records can be
//! listed, modified with an audit trail, and exported to a spreadsheet.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings management
//! - `error`: Custom error types
//! - `models`: Record, ID, meters and supervision types
//! - `storage`: CSV record store
//! - `audit`: Modification audit log
//! - `services`: Input validation on top of the store
//! - `export`: Spreadsheet export
//! - `display`: Terminal table formatting
//! - `cli`: Subcommand handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use soterrado::audit::AuditLogger;
//! use soterrado::models::{Meters, NewRecord, Supervision};
//! use soterrado::storage::RecordStore;
//!
//! let store = RecordStore::new(table_path, AuditLogger::new(log_path));
//! store.initialize()?;
//! let record = store.append(NewRecord::new(Meters::from_whole(10), "Juan", "Centro", Supervision::No))?;
//! store.update(&record.id.to_string(), Meters::from_whole(25), Supervision::from_flag(true, "Alice"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SoterradoError, SoterradoResult};
