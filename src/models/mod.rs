//! Core data models for soterrado
//!
//! Work records, their identifiers and the typed meters quantity.

pub mod ids;
pub mod meters;
pub mod record;

pub use ids::RecordId;
pub use meters::{Meters, MetersParseError};
pub use record::{
    FieldChange, NewRecord, RawRecord, Record, RecordField, RecordParseError, Supervision,
    COLUMNS, NO_SUPERVISOR, SUPERVISED_TOKEN, UNSUPERVISED_TOKEN,
};
