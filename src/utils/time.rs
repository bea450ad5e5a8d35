//! Time utilities: parsing HH:MM cutoffs and `--at` timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]` and the ISO `T` separator.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
}

/// Current local wall-clock time, seconds precision.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse an optional `--at`, defaulting to now.
pub fn datetime_or_now(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_datetime(s).ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(now_local()),
    }
}

/// Storage format of timestamps in the database.
pub fn to_db_str(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn from_db_str(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}
