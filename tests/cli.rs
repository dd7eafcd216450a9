use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn soterrado(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("soterrado").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.env_remove("SOTERRADO_DATA_DIR");
    cmd
}

#[test]
fn test_add_list_modify_export() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .args(["add", "10", "Juan", "Barrio Sur-Lote 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record saved."));

    soterrado(&data_dir)
        .args(["add", "4.5", "Ana", "Centro", "--supervisor", "Marta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 2"));

    soterrado(&data_dir)
        .args(["modify", "1", "25", "--supervisor", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record ID 1 modified (3 fields changed)"));

    soterrado(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("25.0 m").and(predicate::str::contains("Alice")));

    let audit = std::fs::read_to_string(data_dir.path().join("modificaciones.log")).unwrap();
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains(
        "INFO - ID 1: Meters [10.0 -> 25.0]; Supervised [NO -> SI]; Supervisor [N/A -> Alice]"
    ));

    soterrado(&data_dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 records"));

    let workbook = std::fs::read(data_dir.path().join("reporte_soterrado.xlsx")).unwrap();
    assert!(workbook.starts_with(b"PK"));

    let csv_path = data_dir.path().join("report.csv");
    soterrado(&data_dir)
        .arg("export")
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success();

    let report = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(report.lines().count(), 3);
}

#[test]
fn test_legacy_rows_do_not_break_commands() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(
        data_dir.path().join("registros.csv"),
        "ID,Fecha,Metros,Tecnico,Ubicacion,Supervisado,Supervisor\n\
         1,2024-01-01 08:00,12.345,Ana,Centro,NO,N/A\n\
         legacy,2023-12-31 17:00,12,Luis,Norte,SI,Marta\n",
    )
    .unwrap();

    soterrado(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("12.35 m"));

    soterrado(&data_dir)
        .args(["modify", "1", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record ID 1 modified (1 field changed)"));

    let table = std::fs::read_to_string(data_dir.path().join("registros.csv")).unwrap();
    assert!(table.contains("legacy,2023-12-31 17:00,12,Luis,Norte,SI,Marta"));

    soterrado(&data_dir)
        .args(["add", "3", "Rosa", "Sur"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 2"));
}

#[test]
fn test_modify_id_with_newline_logs_one_line() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .args([
            "modify",
            "abc\n2024-01-01 00:00:00,000 - INFO - ID 1: Meters [1.0 -> 999.0]",
            "5",
        ])
        .assert()
        .success();

    let audit = std::fs::read_to_string(data_dir.path().join("modificaciones.log")).unwrap();
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains(" - ERROR - "));
    assert!(audit.contains("abc\\n2024-01-01"));
}

#[test]
fn test_add_rejects_invalid_meters() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .args(["add", "0", "Juan", "Centro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    let table = std::fs::read_to_string(data_dir.path().join("registros.csv")).unwrap();
    assert_eq!(table.lines().count(), 1);
}

#[test]
fn test_modify_reports_missing_and_malformed_ids() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .args(["modify", "999", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No record found with ID 999."));

    soterrado(&data_dir)
        .args(["modify", "abc", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a valid record ID"));

    let audit = std::fs::read_to_string(data_dir.path().join("modificaciones.log")).unwrap();
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains(" - ERROR - "));
}

#[test]
fn test_export_with_no_records() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records to export."));

    assert!(!data_dir.path().join("reporte_soterrado.xlsx").exists());
}

#[test]
fn test_menu_from_piped_input() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .write_stdin("1\n8\nLuis\nNorte\nn\n2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Luis").and(predicate::str::contains("Goodbye!")));
}

#[test]
fn test_init_creates_files() {
    let data_dir = TempDir::new().unwrap();

    soterrado(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(data_dir.path().join("registros.csv").exists());
    assert!(data_dir.path().join("config.json").exists());
}
