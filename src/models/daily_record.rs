use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Canonical per-worker, per-day attendance produced by the normalizer.
/// Days without any event have no record and count as absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub worker_id: i64,
    pub day: NaiveDate,
    pub attended: bool,
    pub late: bool,
    pub hours_worked: f64,
    /// Earliest check-in of the day; drives the hourly buckets.
    pub first_check_in: NaiveTime,
    /// Number of events merged into this record.
    pub sessions: usize,
}
