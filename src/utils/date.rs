//! Date helpers: today's date, parsing of single dates and `--range`
//! expressions.

use crate::core::calculator::DateRange;
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional `--date`, defaulting to today.
pub fn date_or_today(s: Option<&String>) -> AppResult<NaiveDate> {
    match s {
        Some(v) => parse_date(v).ok_or_else(|| AppError::InvalidDate(v.to_string())),
        None => Ok(today()),
    }
}

/// The `days` days ending on `end` (inclusive), e.g. the default 30-day
/// report window.
pub fn last_n_days(end: NaiveDate, days: u32) -> AppResult<DateRange> {
    let start = days
        .checked_sub(1)
        .and_then(|back| end.checked_sub_days(Days::new(u64::from(back))))
        .ok_or_else(|| {
            AppError::InvalidFilter(format!("cannot build a {days}-day window ending on {end}"))
        })?;
    DateRange::new(start, end)
}

/// Parse `--range` (year / month / day / interval).
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// An interval whose end precedes its start is an `InvalidFilter`.
pub fn parse_range(r: &str) -> AppResult<DateRange> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "start and end of '{r}' must have the same format"
            )));
        }

        let (from, _) = period_bounds(start)?;
        let (_, to) = period_bounds(end)?;
        DateRange::new(from, to)
    } else {
        let (from, to) = period_bounds(r.trim())?;
        DateRange::new(from, to)
    }
}

/// First and last day of a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let d2 = last_day_of_month(d1.year(), d1.month()).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// Human-readable description of a range, used for report and PDF titles.
pub fn describe_range(range: &DateRange) -> String {
    let (from, to) = (range.from(), range.to());

    if from == to {
        return from.format("%A, %B %-d, %Y").to_string();
    }

    if from.day() == 1
        && Some(to) == last_day_of_month(from.year(), from.month())
    {
        return format!("{} {}", month_name(from.month()), from.year());
    }

    format!("{} to {}", from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn last_n_days_ends_on_the_given_day() {
        let range = last_n_days(d("2025-03-10"), 7).unwrap();
        assert_eq!(range.from(), d("2025-03-04"));
        assert_eq!(range.to(), d("2025-03-10"));

        let single = last_n_days(d("2025-03-10"), 1).unwrap();
        assert_eq!(single.from(), single.to());
    }

    #[test]
    fn last_n_days_rejects_impossible_windows() {
        assert!(matches!(
            last_n_days(d("2025-03-10"), 0),
            Err(AppError::InvalidFilter(_))
        ));
        assert!(matches!(
            last_n_days(d("2025-03-10"), u32::MAX),
            Err(AppError::InvalidFilter(_))
        ));
    }
}
