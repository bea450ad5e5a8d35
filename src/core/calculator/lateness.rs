use crate::models::attendance_status::AttendanceStatus;
use chrono::{NaiveTime, Timelike};

/// Late-arrival cutoff shared by the sign-in mutator and the normalizer.
///
/// A check-in is late when its hour is past the cutoff hour, or on the
/// cutoff hour with a later minute. Seconds are not considered, so 09:00:59
/// is still on time with a 09:00 cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatePolicy {
    pub cutoff: NaiveTime,
}

impl Default for LatePolicy {
    fn default() -> Self {
        Self {
            cutoff: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl LatePolicy {
    pub fn new(cutoff: NaiveTime) -> Self {
        Self { cutoff }
    }

    pub fn is_late(&self, check_in: NaiveTime) -> bool {
        check_in.hour() > self.cutoff.hour()
            || (check_in.hour() == self.cutoff.hour() && check_in.minute() > self.cutoff.minute())
    }

    /// Status to store on a fresh sign-in.
    pub fn status_for(&self, check_in: NaiveTime) -> AttendanceStatus {
        if self.is_late(check_in) {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}
