use crate::models::attendance_event::AttendanceEvent;
use crate::models::daily_record::DailyRecord;
use crate::models::worker::Worker;
use crate::utils::time::to_db_str;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Typed value of an exported cell. Text formats print it, XLSX keeps the
/// type (numbers stay numbers, dates become Excel serials).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Bool(bool),
    Empty,
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(n) => format!("{n:.2}"),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(t) => t.format("%Y-%m-%d %H:%M").to_string(),
            Cell::Time(t) => t.format("%H:%M").to_string(),
            Cell::Bool(true) => "yes".to_string(),
            Cell::Bool(false) => "no".to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// A flat row shared by every export format.
pub trait ExportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<Cell>;
}

/// One attendance event joined with its worker.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub worker_id: i64,
    pub worker: String,
    pub role: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: String,
    pub hours: f64,
    #[serde(skip)]
    check_in_at: Option<NaiveDateTime>,
    #[serde(skip)]
    check_out_at: Option<NaiveDateTime>,
}

impl EventExport {
    pub fn new(ev: &AttendanceEvent, worker: Option<&Worker>) -> Self {
        Self {
            id: ev.id,
            worker_id: ev.worker_id,
            worker: worker.map(|w| w.name.clone()).unwrap_or_default(),
            role: worker.map(|w| w.role.clone()).unwrap_or_default(),
            check_in: ev.check_in.as_ref().map(to_db_str),
            check_out: ev.check_out.as_ref().map(to_db_str),
            status: ev.status.to_db_str().to_string(),
            hours: ev.hours,
            check_in_at: ev.check_in,
            check_out_at: ev.check_out,
        }
    }
}

impl ExportRow for EventExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id", "worker_id", "worker", "role", "check_in", "check_out", "status", "hours",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::Int(self.worker_id),
            Cell::Text(self.worker.clone()),
            Cell::Text(self.role.clone()),
            self.check_in_at.map(Cell::DateTime).unwrap_or(Cell::Empty),
            self.check_out_at.map(Cell::DateTime).unwrap_or(Cell::Empty),
            Cell::Text(self.status.clone()),
            Cell::Number(self.hours),
        ]
    }
}

/// One normalized daily record joined with its worker.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub worker_id: i64,
    pub worker: String,
    pub role: String,
    pub day: NaiveDate,
    pub attended: bool,
    pub late: bool,
    pub first_check_in: String,
    pub hours_worked: f64,
    pub sessions: usize,
    #[serde(skip)]
    first_in: NaiveTime,
}

impl RecordExport {
    pub fn new(r: &DailyRecord, worker: Option<&Worker>) -> Self {
        Self {
            worker_id: r.worker_id,
            worker: worker.map(|w| w.name.clone()).unwrap_or_default(),
            role: worker.map(|w| w.role.clone()).unwrap_or_default(),
            day: r.day,
            attended: r.attended,
            late: r.late,
            first_check_in: r.first_check_in.format("%H:%M:%S").to_string(),
            hours_worked: r.hours_worked,
            sessions: r.sessions,
            first_in: r.first_check_in,
        }
    }
}

impl ExportRow for RecordExport {
    fn headers() -> &'static [&'static str] {
        &[
            "worker_id",
            "worker",
            "role",
            "day",
            "attended",
            "late",
            "first_check_in",
            "hours_worked",
            "sessions",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.worker_id),
            Cell::Text(self.worker.clone()),
            Cell::Text(self.role.clone()),
            Cell::Date(self.day),
            Cell::Bool(self.attended),
            Cell::Bool(self.late),
            Cell::Time(self.first_in),
            Cell::Number(self.hours_worked),
            Cell::Int(self.sessions as i64),
        ]
    }
}

pub(crate) fn rows_to_table<R: ExportRow>(rows: &[R]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.cells().iter().map(Cell::display).collect())
        .collect()
}
