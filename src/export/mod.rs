//! Export module for soterrado
//!
//! Produces a spreadsheet report of every record, as an Excel workbook or CSV.

pub mod csv;
pub mod report;
pub mod xlsx;

pub use self::csv::export_records_csv;
pub use report::{export_report, ExportOutcome, ReportFormat};
pub use xlsx::export_records_xlsx;
