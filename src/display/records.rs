//! Record display formatting
//!
//! Formats the record table for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Meters, Record};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Metros")]
    meters: String,
    #[tabled(rename = "Técnico")]
    technician: String,
    #[tabled(rename = "Ubicación")]
    location: String,
    #[tabled(rename = "Supervisado")]
    supervised: String,
    #[tabled(rename = "Supervisor")]
    supervisor: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.to_string(),
            date: record.date.clone(),
            meters: format!("{} m", record.meters),
            technician: record.technician.clone(),
            location: record.location.clone(),
            supervised: record.supervision.flag().to_string(),
            supervisor: record.supervision.supervisor().to_string(),
        }
    }
}

/// Format records as a table followed by a totals line
pub fn format_record_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records yet.".to_string();
    }

    let mut table = Table::new(records.iter().map(RecordRow::from));
    table.with(Style::rounded());

    let total: Meters = records.iter().map(|r| r.meters).sum();
    let supervised = records
        .iter()
        .filter(|r| r.supervision.is_supervised())
        .count();

    format!(
        "{}\n{} records, {} m total, {} supervised\n",
        table,
        records.len(),
        total,
        supervised
    )
}

/// Format a single record's details
pub fn format_record_details(record: &Record) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record {}\n", record.id));
    output.push_str(&format!("  Date:        {}\n", record.date));
    output.push_str(&format!("  Meters:      {} m\n", record.meters));
    output.push_str(&format!("  Technician:  {}\n", record.technician));
    output.push_str(&format!("  Location:    {}\n", record.location));
    output.push_str(&format!("  Supervised:  {}\n", record.supervision.flag()));
    output.push_str(&format!("  Supervisor:  {}\n", record.supervision.supervisor()));

    output
}
