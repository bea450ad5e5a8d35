#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rattendance::models::attendance_event::{AttendanceEvent, hours_between};
use rattendance::models::attendance_status::AttendanceStatus;
use rattendance::models::daily_record::DailyRecord;
use rattendance::models::worker::Worker;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with `HOME` pointed at a private directory so no
/// user configuration leaks into the run.
pub fn rta() -> Command {
    let mut home = env::temp_dir();
    home.push("rattendance_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rattendance");
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init a DB and add three workers: Ada and Bob (Engineering), Cy (Technician).
pub fn init_db_with_workers(db_path: &str) {
    rta()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (name, role) in [("Ada", "Engineering"), ("Bob", "Engineering"), ("Cy", "Technician")] {
        rta()
            .args(["--db", db_path, "worker", "add", name, "--role", role])
            .assert()
            .success();
    }
}

pub fn signin(db_path: &str, worker: &str, at: &str) {
    rta()
        .args(["--db", db_path, "signin", worker, "--at", at])
        .assert()
        .success();
}

pub fn signout(db_path: &str, worker: &str, at: &str) {
    rta()
        .args(["--db", db_path, "signout", worker, "--at", at])
        .assert()
        .success();
}

// ---------------------------
// Engine fixtures
// ---------------------------

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// Closed event with hours derived from the two instants.
pub fn closed(id: i64, worker_id: i64, check_in: &str, check_out: &str, status: AttendanceStatus) -> AttendanceEvent {
    let (i, o) = (at(check_in), at(check_out));
    AttendanceEvent {
        id,
        worker_id,
        check_in: Some(i),
        check_out: Some(o),
        status,
        hours: hours_between(i, o),
    }
}

pub fn open(id: i64, worker_id: i64, check_in: &str, status: AttendanceStatus) -> AttendanceEvent {
    AttendanceEvent::open(id, worker_id, at(check_in), status)
}

/// Attended record on `d`, first check-in at `hh:mm`.
pub fn record(worker_id: i64, d: &str, hh: u32, mm: u32, late: bool, hours: f64) -> DailyRecord {
    DailyRecord {
        worker_id,
        day: day(d),
        attended: true,
        late,
        hours_worked: hours,
        first_check_in: NaiveTime::from_hms_opt(hh, mm, 0).unwrap(),
        sessions: 1,
    }
}

pub fn worker(id: i64, name: &str, role: &str) -> Worker {
    Worker::new(id, name, role)
}
