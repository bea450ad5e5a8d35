use chrono::NaiveDate;
use serde::Serialize;

/// One hour-of-day bucket of the cumulative sign-in series.
/// `on_time` and `late` already include every earlier bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    pub hour: u32,
    pub label: String,
    pub on_time: usize,
    pub late: usize,
}

impl HourlyPoint {
    pub fn total(&self) -> usize {
        self.on_time + self.late
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub present: usize,
    pub late: usize,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentHours {
    pub department: String,
    pub hours: f64,
}

/// Derived statistics for a date range and worker scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_workers_in_scope: usize,
    pub present_count: usize,
    pub late_count: usize,
    pub absent_count: usize,
    pub attendance_percentage: f64,
    pub total_hours: f64,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
    pub department_hours: Vec<DepartmentHours>,
}
