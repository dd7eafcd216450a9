//! Record service
//!
//! Validates operator input before it reaches the record store. Invalid input
//! is rejected with [`SoterradoError::Validation`] and never persisted.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;

use crate::config::Settings;
use crate::error::{SoterradoError, SoterradoResult};
use crate::models::{Meters, NewRecord, Record, Supervision};
use crate::storage::{RecordStore, UpdateOutcome};

/// Service for recording and modifying work records
pub struct RecordService<'a> {
    store: &'a RecordStore,
    settings: &'a Settings,
}

impl<'a> RecordService<'a> {
    /// Create a new record service
    pub fn new(store: &'a RecordStore, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Record a new task
    ///
    /// `supervisor` is `Some(name)` for supervised tasks.
    pub fn create(
        &self,
        meters: &str,
        technician: &str,
        location: &str,
        supervisor: Option<&str>,
    ) -> SoterradoResult<Record> {
        let meters = parse_meters(meters)?;
        let technician = required_text("Technician", technician)?;
        let location = required_text("Location", location)?;
        let supervision = supervision_for(supervisor)?;

        let new_record =
            NewRecord::new(meters, technician, location, supervision).dated(self.timestamp()?);

        self.store.append(new_record)
    }

    /// Modify the meters and supervision of an existing record
    ///
    /// The ID is handed to the store as typed so that malformed IDs are
    /// reported (and audited) there.
    pub fn modify(
        &self,
        id: &str,
        meters: &str,
        supervisor: Option<&str>,
    ) -> SoterradoResult<UpdateOutcome> {
        let meters = parse_meters(meters)?;
        let supervision = supervision_for(supervisor)?;

        self.store.update(id, meters, supervision)
    }

    /// All records in storage order
    pub fn list(&self) -> SoterradoResult<Vec<Record>> {
        self.store.read_all()
    }

    fn timestamp(&self) -> SoterradoResult<String> {
        let format = &self.settings.date_format;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(SoterradoError::Config(format!(
                "Invalid date format in settings: '{}'",
                format
            )));
        }
        Ok(Local::now().format(format).to_string())
    }
}

/// Parse operator-supplied meters, which must be a positive number
pub fn parse_meters(input: &str) -> SoterradoResult<Meters> {
    let meters = Meters::parse(input).map_err(|e| {
        SoterradoError::Validation(format!(
            "{}. Enter a number greater than 0, like '12' or '12.5'",
            e
        ))
    })?;

    if !meters.is_positive() {
        return Err(SoterradoError::Validation(format!(
            "Meters must be greater than 0, got {}",
            meters
        )));
    }

    Ok(meters)
}

fn required_text<'s>(field: &str, value: &'s str) -> SoterradoResult<&'s str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SoterradoError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(value)
}

fn supervision_for(supervisor: Option<&str>) -> SoterradoResult<Supervision> {
    match supervisor {
        Some(name) => Ok(Supervision::from_flag(
            true,
            required_text("Supervisor", name)?,
        )),
        None => Ok(Supervision::No),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, MemorySink};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(
            temp_dir.path().join("registros.csv"),
            AuditLogger::with_sink(MemorySink::new()),
        );
        (temp_dir, store)
    }

    #[test]
    fn test_create_record() {
        let (_temp, store) = create_test_store();
        let settings = Settings::default();
        let service = RecordService::new(&store, &settings);

        let record = service
            .create("12.5", " Juan ", "Barrio Norte-Lote 4", Some("Alice"))
            .unwrap();

        assert_eq!(record.id.value(), 1);
        assert_eq!(record.meters, Meters::from_centimeters(1250));
        assert_eq!(record.technician, "Juan");
        assert_eq!(record.supervision.supervisor(), "Alice");
        assert_eq!(service.list().unwrap(), vec![record]);
    }

    #[test]
    fn test_create_uses_configured_date_format() {
        let (_temp, store) = create_test_store();
        let settings = Settings {
            date_format: "%Y".to_string(),
            ..Settings::default()
        };
        let service = RecordService::new(&store, &settings);

        let record = service.create("1", "Juan", "Centro", None).unwrap();

        assert_eq!(record.date, Local::now().format("%Y").to_string());
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let (_temp, store) = create_test_store();
        let settings = Settings {
            date_format: "%Q".to_string(),
            ..Settings::default()
        };
        let service = RecordService::new(&store, &settings);

        let err = service.create("1", "Juan", "Centro", None).unwrap_err();
        assert!(matches!(err, SoterradoError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_meters() {
        let (_temp, store) = create_test_store();
        let settings = Settings::default();
        let service = RecordService::new(&store, &settings);

        for input in ["0", "-4", "abc", ""] {
            let err = service.create(input, "Juan", "Centro", None).unwrap_err();
            assert!(err.is_validation(), "{} should be rejected", input);
        }
        assert!(!store.path().exists());
    }

    #[test]
    fn test_rejects_blank_supervisor() {
        let (_temp, store) = create_test_store();
        let settings = Settings::default();
        let service = RecordService::new(&store, &settings);

        let err = service.create("3", "Juan", "Centro", Some("  ")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_modify_record() {
        let (_temp, store) = create_test_store();
        let settings = Settings::default();
        let service = RecordService::new(&store, &settings);
        service.create("10", "Juan", "Centro", None).unwrap();

        let outcome = service.modify("1", "25", Some("Alice")).unwrap();

        assert!(outcome.succeeded());
        let record = &service.list().unwrap()[0];
        assert_eq!(record.meters, Meters::from_whole(25));
        assert_eq!(record.supervision.flag(), "SI");
    }

    #[test]
    fn test_modify_validates_before_store() {
        let (_temp, store) = create_test_store();
        let settings = Settings::default();
        let service = RecordService::new(&store, &settings);

        let err = service.modify("abc", "-1", None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_meters() {
        assert_eq!(parse_meters("7.25").unwrap(), Meters::from_centimeters(725));
        assert!(parse_meters("0.0").is_err());
    }
}
