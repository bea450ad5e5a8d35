use super::attendance_status::AttendanceStatus;
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::round_to;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One check-in/check-out record of a worker (⇔ `attendance` table row).
///
/// `check_in` is optional only because raw data coming from imports or
/// external stores may lack it: such events are malformed and every engine
/// entry point rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    #[serde(default)]
    pub id: i64,
    pub worker_id: i64,
    pub check_in: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub hours: f64,
}

impl AttendanceEvent {
    /// Event created by a sign-in: open, zero hours.
    pub fn open(
        id: i64,
        worker_id: i64,
        check_in: NaiveDateTime,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id,
            worker_id,
            check_in: Some(check_in),
            check_out: None,
            status,
            hours: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Calendar day the event belongs to (the check-in day, even when the
    /// event runs past midnight).
    pub fn day(&self) -> Option<NaiveDate> {
        self.check_in.map(|t| t.date())
    }

    /// Return the check-in timestamp, or a `MalformedEvent` error when the
    /// event cannot be used for aggregation.
    pub fn validated_check_in(&self) -> AppResult<NaiveDateTime> {
        let check_in = self.check_in.ok_or_else(|| {
            AppError::MalformedEvent(format!("event {} has no check-in", self.id))
        })?;

        if let Some(out) = self.check_out
            && out < check_in
        {
            return Err(AppError::MalformedEvent(format!(
                "event {} checks out at {} before checking in at {}",
                self.id, out, check_in
            )));
        }

        if self.hours < 0.0 || !self.hours.is_finite() {
            return Err(AppError::MalformedEvent(format!(
                "event {} has invalid hours {}",
                self.id, self.hours
            )));
        }

        Ok(check_in)
    }

    pub fn check_in_str(&self) -> String {
        self.check_in
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    pub fn check_out_str(&self) -> String {
        self.check_out
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Hours between two instants, rounded to 2 decimals as stored on sign-out.
pub fn hours_between(check_in: NaiveDateTime, check_out: NaiveDateTime) -> f64 {
    let secs = (check_out - check_in).num_seconds().max(0) as f64;
    round_to(secs / 3600.0, 2)
}
