mod common;

use common::{init_db_with_workers, rta, setup_test_db, signin, signout, temp_out};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

/// Two days of attendance for Ada, one late day for Cy.
fn populate(db_path: &str) {
    init_db_with_workers(db_path);

    signin(db_path, "1", "2025-03-10 08:30");
    signout(db_path, "1", "2025-03-10 12:30");
    signin(db_path, "1", "2025-03-10 13:30");
    signout(db_path, "1", "2025-03-10 17:30");
    signin(db_path, "1", "2025-03-11 08:45");
    signout(db_path, "1", "2025-03-11 16:45");
    signin(db_path, "3", "2025-03-11 09:40");
    signout(db_path, "3", "2025-03-11 15:40");
}

#[test]
fn test_export_csv_events() {
    let db_path = setup_test_db("export_csv");
    populate(&db_path);

    let out = temp_out("export_csv", "csv");

    rta()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,worker_id,worker,role,check_in,check_out,status,hours")
    );
    assert_eq!(lines.count(), 4);
    assert!(content.contains("2025-03-11 09:40:00"));
    assert!(content.contains("Late"));
}

#[test]
fn test_export_json_with_range() {
    let db_path = setup_test_db("export_json_range");
    populate(&db_path);

    let out = temp_out("export_json_range", "json");

    rta()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2025-03-11",
            "--force",
        ])
        .assert()
        .success();

    let data: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    let rows = data.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["check_in"].as_str().unwrap().starts_with("2025-03-11")));
}

#[test]
fn test_export_daily_records_merge_sessions() {
    let db_path = setup_test_db("export_records");
    populate(&db_path);

    let out = temp_out("export_records", "json");

    rta()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &out, "--records", "--force"])
        .assert()
        .success();

    let data: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    let rows = data.as_array().expect("array");

    // Ada on the 10th and 11th, Cy on the 11th
    assert_eq!(rows.len(), 3);

    let ada_10 = &rows[0];
    assert_eq!(ada_10["worker_id"], 1);
    assert_eq!(ada_10["day"], "2025-03-10");
    assert_eq!(ada_10["hours_worked"], 8.0);
    assert_eq!(ada_10["sessions"], 2);
    assert_eq!(ada_10["late"], false);

    let cy = rows.iter().find(|r| r["worker_id"] == 3).expect("Cy's record");
    assert_eq!(cy["late"], true);
}

#[test]
fn test_export_xlsx_and_pdf() {
    let db_path = setup_test_db("export_binary");
    populate(&db_path);

    let xlsx = temp_out("export_binary", "xlsx");
    rta()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx, "--force"])
        .assert()
        .success();
    let bytes = fs::read(&xlsx).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));

    let pdf = temp_out("export_binary", "pdf");
    rta()
        .args([
            "--db", &db_path, "export", "--format", "pdf", "--file", &pdf, "--range", "2025-03",
            "--records", "--force",
        ])
        .assert()
        .success();
    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    populate(&db_path);

    rta()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_export_existing_file_cancelled_without_confirmation() {
    let db_path = setup_test_db("export_existing");
    populate(&db_path);

    let out = temp_out("export_existing", "csv");
    fs::write(&out, "keep me").expect("write placeholder");

    rta()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("export cancelled"));

    assert_eq!(fs::read_to_string(&out).expect("read placeholder"), "keep me");
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    populate(&db_path);

    let out = temp_out("export_empty", "csv");

    rta()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events found"));

    assert!(fs::metadata(&out).is_err());
}
