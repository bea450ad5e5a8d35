mod common;

use common::{init_db_with_workers, rta, setup_test_db, signin, signout, temp_out};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    rta()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_worker_roster_lifecycle() {
    let db_path = setup_test_db("worker_lifecycle");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "worker", "add", "Dee", "--email", "dee@example.com", "--role", "Technician"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Worker Dee added with id 4"));

    rta()
        .args(["--db", &db_path, "worker", "list", "--role", "Technician"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dee"))
        .stdout(predicate::str::contains("Cy"))
        .stdout(predicate::str::contains("Ada").not());

    rta()
        .args(["--db", &db_path, "worker", "edit", "4", "--name", "Dee Park"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Worker 4 updated"));

    rta()
        .args(["--db", &db_path, "worker", "status", "4", "away"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Worker 4 is now Away"));

    rta()
        .args(["--db", &db_path, "worker", "list", "--name", "park"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dee Park"));

    rta()
        .args(["--db", &db_path, "worker", "del", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    rta()
        .args(["--db", &db_path, "worker", "edit", "4", "--role", "Engineering"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker not found: 4"));
}

#[test]
fn test_worker_status_rejects_unknown_value() {
    let db_path = setup_test_db("worker_bad_status");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "worker", "status", "1", "sleeping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn test_signin_late_and_signout_hours() {
    let db_path = setup_test_db("sign_flow");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "signin", "1", "--at", "2025-03-10 08:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Worker 1 signed in at 08:30"));

    rta()
        .args(["--db", &db_path, "signin", "2", "--at", "2025-03-10 09:15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signed in late at 09:15"));

    rta()
        .args(["--db", &db_path, "signout", "1", "--at", "2025-03-10 17:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("08h 30m"));
}

#[test]
fn test_double_signin_is_rejected() {
    let db_path = setup_test_db("double_signin");
    init_db_with_workers(&db_path);

    signin(&db_path, "1", "2025-03-10 08:30");

    rta()
        .args(["--db", &db_path, "signin", "1", "--at", "2025-03-10 10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already signed in"));
}

#[test]
fn test_signout_without_signin_fails() {
    let db_path = setup_test_db("signout_without_signin");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "signout", "3", "--at", "2025-03-10 17:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker 3 is not signed in"));
}

#[test]
fn test_signin_unknown_worker_fails() {
    let db_path = setup_test_db("signin_unknown");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "signin", "42", "--at", "2025-03-10 08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker not found: 42"));
}

#[test]
fn test_list_filters_by_period() {
    let db_path = setup_test_db("list_period");
    init_db_with_workers(&db_path);

    signin(&db_path, "1", "2025-03-10 08:30");
    signout(&db_path, "1", "2025-03-10 12:30");
    signin(&db_path, "1", "2025-04-02 08:30");
    signout(&db_path, "1", "2025-04-02 16:30");

    rta()
        .args(["--db", &db_path, "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-10"))
        .stdout(predicate::str::contains("2025-04-02").not())
        .stdout(predicate::str::contains("1 event(s), 04h 00m worked"));

    rta()
        .args(["--db", &db_path, "list", "--role", "Technician"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No attendance events found."));
}

#[test]
fn test_dashboards() {
    let db_path = setup_test_db("dashboards");
    init_db_with_workers(&db_path);

    for d in ["2025-03-08", "2025-03-09", "2025-03-10"] {
        signin(&db_path, "1", &format!("{d} 08:30"));
        signout(&db_path, "1", &format!("{d} 16:30"));
    }
    signin(&db_path, "2", "2025-03-10 09:20");

    rta()
        .args(["--db", &db_path, "dashboard", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin dashboard (2025-03-10)"))
        .stdout(predicate::str::contains("66.7%"))
        .stdout(predicate::str::contains("Sign-ins by hour"))
        .stdout(predicate::str::contains("Cy"));

    rta()
        .args(["--db", &db_path, "dashboard", "--worker", "1", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard of Ada (2025-03-10)"))
        .stdout(predicate::str::is_match(r"Streak:\s+\S*3\S* day\(s\)").unwrap());
}

#[test]
fn test_report_json() {
    let db_path = setup_test_db("report_json");
    init_db_with_workers(&db_path);

    signin(&db_path, "1", "2025-03-10 08:30");
    signout(&db_path, "1", "2025-03-10 17:00");
    signin(&db_path, "2", "2025-03-10 09:15");
    signout(&db_path, "2", "2025-03-10 17:15");

    let output = rta()
        .args(["--db", &db_path, "report", "--range", "2025-03-10", "--json"])
        .output()
        .expect("run report");
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(stats["total_workers_in_scope"], 3);
    assert_eq!(stats["present_count"], 2);
    assert_eq!(stats["late_count"], 1);
    assert_eq!(stats["attendance_percentage"], 66.7);
    assert_eq!(stats["total_hours"], 16.5);

    let output = rta()
        .args(["--db", &db_path, "report", "--range", "2025-03-10", "--dept", "Engineering", "--json"])
        .output()
        .expect("run report");
    let stats: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(stats["total_workers_in_scope"], 2);
    assert_eq!(stats["attendance_percentage"], 100.0);
}

#[test]
fn test_report_unknown_department_fails() {
    let db_path = setup_test_db("report_bad_dept");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "report", "--range", "2025-03", "--dept", "Marketing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter"));
}

#[test]
fn test_report_rejects_inverted_range() {
    let db_path = setup_test_db("report_inverted");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "report", "--range", "2025-03-10:2025-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter"));
}

#[test]
fn test_import_aborts_then_skips_invalid() {
    let db_path = setup_test_db("import");
    init_db_with_workers(&db_path);

    let file = temp_out("import_events", "json");
    fs::write(
        &file,
        r#"[
            {"worker_id": 1, "check_in": "2025-03-03T08:30:00", "check_out": "2025-03-03T17:00:00", "status": "Present"},
            {"worker_id": 2, "check_in": "2025-03-03T10:00:00", "check_out": "2025-03-03T09:00:00", "status": "Late"},
            {"worker_id": 3, "check_in": "2025-03-03T09:30:00", "status": "Late"}
        ]"#,
    )
    .expect("write import file");

    rta()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed attendance event"));

    rta()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No attendance events found."));

    rta()
        .args(["--db", &db_path, "import", "--file", &file, "--skip-invalid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 event(s), skipped 1"));

    rta()
        .args(["--db", &db_path, "list", "--period", "2025-03-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 event(s)"));
}

#[test]
fn test_backup_refuses_overwrite_without_force() {
    let db_path = setup_test_db("backup");
    init_db_with_workers(&db_path);

    let dest = temp_out("backup", "sqlite");

    rta()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));
    assert!(fs::metadata(&dest).is_ok());

    rta()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rta()
        .args(["--db", &db_path, "backup", "--file", &dest, "--force", "--compress"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".zip"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_workers(&db_path);

    signin(&db_path, "1", "2025-03-10 08:30");

    rta()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Internal log:"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("worker_add"))
        .stdout(predicate::str::contains("signin"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_workers(&db_path);

    rta()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity check passed"));
}

#[test]
fn test_task_lifecycle_and_worker_dashboard() {
    let db_path = setup_test_db("task_lifecycle");
    init_db_with_workers(&db_path);

    rta()
        .args([
            "--db", &db_path, "task", "add", "1", "Calibrate sensors", "--deadline", "2025-03-12",
            "--status", "in-progress", "--progress", "40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task Calibrate sensors added with id 1"));

    rta()
        .args(["--db", &db_path, "task", "add", "1", "Write report", "--deadline", "2025-03-08"])
        .assert()
        .success();

    rta()
        .args(["--db", &db_path, "task", "add", "1", "Bad", "--deadline", "2025-03-08", "--progress", "150"])
        .assert()
        .failure();

    rta()
        .args(["--db", &db_path, "task", "list", "--worker", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)Write report.*Calibrate sensors").unwrap())
        .stdout(predicate::str::contains("40%"));

    rta()
        .args(["--db", &db_path, "task", "update", "2", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 is Completed (100%)"));

    rta()
        .args(["--db", &db_path, "task", "update", "9", "--progress", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: 9"));

    rta()
        .args(["--db", &db_path, "dashboard", "--worker", "1", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks"))
        .stdout(predicate::str::contains("Task finished"))
        .stdout(predicate::str::contains("Calibrate sensors"));

    rta()
        .args(["--db", &db_path, "dashboard", "--worker", "1", "--date", "2025-03-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overdue"));

    rta()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task_add"))
        .stdout(predicate::str::contains("task_update"));
}
