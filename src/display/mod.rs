//! Display formatting for terminal output
//!
//! Provides table and detail views of work records.

pub mod records;

pub use records::{format_record_details, format_record_table};
