//! Period aggregator: counts, percentages, hours and trend series for a
//! date range and a roster scope.

use super::filter::PeriodFilter;
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::DailyRecord;
use crate::models::period_stats::{DailyPoint, DepartmentHours, HourlyPoint, PeriodStats};
use crate::models::worker::Worker;
use crate::utils::formatting::round_to;
use chrono::Timelike;
use std::collections::{BTreeMap, BTreeSet};

/// One-hour buckets of the hourly sign-in series, identified by their
/// starting hour (bucket `h` covers `h:00..h:59`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBuckets {
    hours: Vec<u32>,
}

impl Default for HourBuckets {
    fn default() -> Self {
        Self {
            hours: vec![8, 9, 10, 11],
        }
    }
}

impl HourBuckets {
    /// Buckets are sorted and de-duplicated; hours must be in `0..24`.
    pub fn new(hours: &[u32]) -> AppResult<Self> {
        if let Some(bad) = hours.iter().find(|h| **h > 23) {
            return Err(AppError::InvalidFilter(format!(
                "hour bucket {bad} is outside 0..23"
            )));
        }
        let mut hours = hours.to_vec();
        hours.sort_unstable();
        hours.dedup();
        Ok(Self { hours })
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }
}

/// `part / total * 100`, one decimal, 0 for an empty scope.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// Compute `PeriodStats` for `filter`.
///
/// The roster is filtered first (department, then name pattern), records are
/// then restricted to the workers in scope and to the inclusive date range.
/// Fails with `InvalidFilter` when the department does not exist.
pub fn aggregate(
    records: &[DailyRecord],
    roster: &[Worker],
    filter: &PeriodFilter,
    buckets: &HourBuckets,
) -> AppResult<PeriodStats> {
    if let Some(dept) = &filter.department
        && !roster.iter().any(|w| &w.role == dept)
    {
        return Err(AppError::InvalidFilter(format!(
            "department '{dept}' does not exist in the roster"
        )));
    }

    let in_scope: BTreeMap<i64, &Worker> = roster
        .iter()
        .filter(|w| filter.department.as_ref().is_none_or(|d| &w.role == d))
        .filter(|w| filter.worker_name.as_ref().is_none_or(|p| w.name_matches(p)))
        .map(|w| (w.id, w))
        .collect();

    let mut scoped: Vec<&DailyRecord> = records
        .iter()
        .filter(|r| r.attended)
        .filter(|r| in_scope.contains_key(&r.worker_id) && filter.range.contains(r.day))
        .collect();
    scoped.sort_by_key(|r| (r.worker_id, r.day, r.first_check_in));

    let total = in_scope.len();
    let present: BTreeSet<i64> = scoped.iter().map(|r| r.worker_id).collect();
    let late_count = scoped.iter().filter(|r| r.late).count();
    let total_hours: f64 = scoped.iter().map(|r| r.hours_worked).sum();

    Ok(PeriodStats {
        from: filter.range.from(),
        to: filter.range.to(),
        total_workers_in_scope: total,
        present_count: present.len(),
        late_count,
        absent_count: total - present.len(),
        attendance_percentage: percentage(present.len(), total),
        total_hours: round_to(total_hours, 2),
        hourly: cumulative_hourly(&scoped, buckets),
        daily: daily_series(&scoped, filter, total),
        department_hours: department_hours(&scoped, &in_scope),
    })
}

/// Running totals of sign-ins per hour bucket. Check-ins outside every
/// bucket are left out of the series.
fn cumulative_hourly(records: &[&DailyRecord], buckets: &HourBuckets) -> Vec<HourlyPoint> {
    let mut on_time_acc = 0;
    let mut late_acc = 0;

    buckets
        .hours()
        .iter()
        .map(|&hour| {
            for r in records.iter().filter(|r| r.first_check_in.hour() == hour) {
                if r.late {
                    late_acc += 1;
                } else {
                    on_time_acc += 1;
                }
            }

            HourlyPoint {
                hour,
                label: format!("{hour:02}:00"),
                on_time: on_time_acc,
                late: late_acc,
            }
        })
        .collect()
}

fn daily_series(records: &[&DailyRecord], filter: &PeriodFilter, total: usize) -> Vec<DailyPoint> {
    filter
        .range
        .days()
        .map(|day| {
            let of_day: Vec<&&DailyRecord> = records.iter().filter(|r| r.day == day).collect();
            let present: BTreeSet<i64> = of_day.iter().map(|r| r.worker_id).collect();

            DailyPoint {
                day,
                present: present.len(),
                late: of_day.iter().filter(|r| r.late).count(),
                attendance_percentage: percentage(present.len(), total),
            }
        })
        .collect()
}

/// Hours per department. Every department in scope is listed, even with
/// zero hours.
fn department_hours(
    records: &[&DailyRecord],
    in_scope: &BTreeMap<i64, &Worker>,
) -> Vec<DepartmentHours> {
    let mut hours: BTreeMap<&str, f64> = in_scope
        .values()
        .map(|w| (w.role.as_str(), 0.0))
        .collect();

    for r in records {
        if let Some(w) = in_scope.get(&r.worker_id) {
            *hours.entry(w.role.as_str()).or_insert(0.0) += r.hours_worked;
        }
    }

    hours
        .into_iter()
        .map(|(department, h)| DepartmentHours {
            department: department.to_string(),
            hours: round_to(h, 2),
        })
        .collect()
}
