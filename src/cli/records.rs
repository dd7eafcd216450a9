//! Record CLI commands
//!
//! Implements the scriptable record commands: add, list, modify, export.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::{format_record_details, format_record_table};
use crate::error::SoterradoResult;
use crate::export::{export_report, ExportOutcome};
use crate::storage::UpdateOutcome;

use super::context::Context;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Record a completed undergrounding task
    Add {
        /// Meters undergrounded (e.g., "12" or "12.5")
        meters: String,
        /// Technician name
        technician: String,
        /// Location (neighbourhood and lot)
        location: String,
        /// Supervisor name; omit for unsupervised tasks
        #[arg(short, long)]
        supervisor: Option<String>,
    },
    /// Show all records
    #[command(alias = "ls")]
    List,
    /// Change the meters and supervision of a record
    Modify {
        /// Record ID
        id: String,
        /// New meters value
        meters: String,
        /// Supervisor name; omit to mark the task as unsupervised
        #[arg(short, long)]
        supervisor: Option<String>,
    },
    /// Export all records to a spreadsheet (Excel workbook, or CSV for a .csv path)
    Export {
        /// Output file path (defaults to the configured report in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a record command
pub fn handle_record_command(ctx: &Context, cmd: RecordCommands) -> SoterradoResult<()> {
    let service = ctx.service();

    match cmd {
        RecordCommands::Add {
            meters,
            technician,
            location,
            supervisor,
        } => {
            let record = service.create(&meters, &technician, &location, supervisor.as_deref())?;
            println!("Record saved.");
            print!("{}", format_record_details(&record));
        }

        RecordCommands::List => {
            println!("{}", format_record_table(&service.list()?));
        }

        RecordCommands::Modify {
            id,
            meters,
            supervisor,
        } => {
            let outcome = service.modify(&id, &meters, supervisor.as_deref())?;
            println!("{}", describe_update_outcome(&outcome));
            if let Some(details) = updated_record_details(ctx, &outcome)? {
                print!("{}", details);
            }
        }

        RecordCommands::Export { output } => {
            let path = output.unwrap_or_else(|| ctx.export_path());
            let outcome = export_report(&service.list()?, &path)?;
            println!("{}", describe_export_outcome(&outcome));
        }
    }

    Ok(())
}

/// Operator-facing message for an update outcome
pub fn describe_update_outcome(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Updated { id, changes } => format!(
            "Record ID {} modified ({} field{} changed). See the audit log for details.",
            id,
            changes.len(),
            if changes.len() == 1 { "" } else { "s" }
        ),
        UpdateOutcome::Unchanged { id } => {
            format!("Record ID {} already had these values; nothing changed.", id)
        }
        UpdateOutcome::NotFound { id } => format!("No record found with ID {}.", id),
        UpdateOutcome::MalformedId { raw } => {
            format!("'{}' is not a valid record ID; IDs are whole numbers.", raw)
        }
    }
}

/// Operator-facing message for an export outcome
pub fn describe_export_outcome(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Written { path, rows } => {
            format!("Exported {} records to: {}", rows, path.display())
        }
        ExportOutcome::NothingToExport => {
            "No records to export. Add some tasks first.".to_string()
        }
    }
}

/// Details of the record touched by a successful update
pub fn updated_record_details(
    ctx: &Context,
    outcome: &UpdateOutcome,
) -> SoterradoResult<Option<String>> {
    let id = match outcome {
        UpdateOutcome::Updated { id, .. } | UpdateOutcome::Unchanged { id } => *id,
        _ => return Ok(None),
    };

    Ok(ctx
        .store
        .read_all()?
        .iter()
        .find(|record| record.id == id)
        .map(format_record_details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldChange, RecordField, RecordId};

    #[test]
    fn test_update_messages() {
        let updated = UpdateOutcome::Updated {
            id: RecordId::new(3),
            changes: vec![FieldChange::new(RecordField::Meters, "1.0", "2.0")],
        };
        assert!(describe_update_outcome(&updated).contains("ID 3 modified (1 field changed)"));

        let missing = UpdateOutcome::NotFound {
            id: RecordId::new(9),
        };
        assert_eq!(describe_update_outcome(&missing), "No record found with ID 9.");
    }

    #[test]
    fn test_export_messages() {
        assert_eq!(
            describe_export_outcome(&ExportOutcome::NothingToExport),
            "No records to export. Add some tasks first."
        );
    }
}
