//! Service layer for soterrado
//!
//! The service layer validates operator input on top of the record store.

pub mod record;

pub use record::{parse_meters, RecordService};
