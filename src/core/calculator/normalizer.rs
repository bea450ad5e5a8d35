//! Event normalizer: raw check-in/check-out events → one `DailyRecord`
//! per worker and calendar day.

use super::lateness::LatePolicy;
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::AttendanceEvent;
use crate::models::daily_record::DailyRecord;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the `late` flag of a daily record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusMode {
    /// Use the status stored on the event at sign-in time.
    #[default]
    TrustStored,
    /// Re-derive lateness from the check-in time and the current cutoff.
    RecomputeFromCutoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub cutoff: NaiveTime,
    pub mode: StatusMode,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            cutoff: LatePolicy::default().cutoff,
            mode: StatusMode::TrustStored,
        }
    }
}

impl NormalizeOptions {
    fn is_late(&self, event: &AttendanceEvent, check_in: NaiveDateTime) -> bool {
        match self.mode {
            StatusMode::TrustStored => event.status.is_late(),
            StatusMode::RecomputeFromCutoff => LatePolicy::new(self.cutoff).is_late(check_in.time()),
        }
    }
}

/// Split events into valid ones and the errors of the malformed ones, so a
/// caller can decide to skip rather than abort.
pub fn validate_events(events: &[AttendanceEvent]) -> (Vec<AttendanceEvent>, Vec<AppError>) {
    let mut valid = Vec::with_capacity(events.len());
    let mut rejected = Vec::new();

    for ev in events {
        match ev.validated_check_in() {
            Ok(_) => valid.push(ev.clone()),
            Err(e) => rejected.push(e),
        }
    }

    (valid, rejected)
}

/// Merge events into daily records.
///
/// - the day is the check-in date; an event running past midnight is not split
/// - `late` reflects the earliest event of the day
/// - `hours_worked` sums the stored hours (open events contribute 0)
///
/// The output is sorted by `(worker_id, day)` and does not depend on the
/// input order. The first malformed event aborts with `MalformedEvent`.
pub fn normalize(
    events: &[AttendanceEvent],
    opts: &NormalizeOptions,
) -> AppResult<Vec<DailyRecord>> {
    let mut by_day: BTreeMap<(i64, NaiveDate), Vec<(NaiveDateTime, &AttendanceEvent)>> =
        BTreeMap::new();

    for ev in events {
        let check_in = ev.validated_check_in()?;
        by_day
            .entry((ev.worker_id, check_in.date()))
            .or_default()
            .push((check_in, ev));
    }

    let records = by_day
        .into_iter()
        .map(|((worker_id, day), mut day_events)| {
            // tie-break on id so equal check-ins resolve the same way every run
            day_events.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.id.cmp(&b.1.id)));

            let (first_check_in, first_event) = day_events[0];
            let hours_worked: f64 = day_events
                .iter()
                .map(|(_, ev)| if ev.is_open() { 0.0 } else { ev.hours })
                .sum();

            DailyRecord {
                worker_id,
                day,
                attended: true,
                late: opts.is_late(first_event, first_check_in),
                hours_worked,
                first_check_in: first_check_in.time(),
                sessions: day_events.len(),
            }
        })
        .collect();

    Ok(records)
}
