//! Change descriptions for audit logging
//!
//! Turns the field changes of an update into the single human-readable
//! message written to the audit log.

use crate::models::{FieldChange, RecordId};

/// Describe the changes applied to a record
///
/// Returns `None` when nothing changed, so no-op updates leave no trace.
///
/// ```
/// use soterrado::audit::describe_changes;
/// use soterrado::models::{FieldChange, RecordField, RecordId};
///
/// let changes = [FieldChange::new(RecordField::Meters, "10.0", "25.0")];
/// assert_eq!(
///     describe_changes(RecordId::new(1), &changes).as_deref(),
///     Some("ID 1: Meters [10.0 -> 25.0]")
/// );
/// ```
pub fn describe_changes(id: RecordId, changes: &[FieldChange]) -> Option<String> {
    if changes.is_empty() {
        return None;
    }

    let notes: Vec<String> = changes.iter().map(ToString::to_string).collect();
    Some(format!("ID {}: {}", id, notes.join("; ")))
}

/// Message logged when an update names a non-numeric ID
pub fn describe_malformed_id(raw_id: &str) -> String {
    format!("Modification attempted with non-numeric ID: {}", raw_id)
}
