use serde::{Deserialize, Serialize};
use std::fmt;

/// Status tagged on an attendance event when the worker signs in.
/// It is never rewritten afterwards; reports that need a different cutoff
/// recompute lateness instead (see `StatusMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Absent => "Absent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(AttendanceStatus::Present),
            "Late" => Some(AttendanceStatus::Late),
            "Absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    pub fn is_late(&self) -> bool {
        matches!(self, AttendanceStatus::Late)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
