use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive date range, compared on dates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if to < from {
            return Err(AppError::InvalidFilter(format!(
                "range ends ({to}) before it starts ({from})"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.from && day <= self.to
    }

    /// Every day of the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

/// Scope of a period aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    pub range: DateRange,
    /// Exact role name; must exist in the roster.
    pub department: Option<String>,
    /// Case-insensitive substring of the worker name.
    pub worker_name: Option<String>,
}

impl PeriodFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            department: None,
            worker_name: None,
        }
    }

    pub fn department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }

    pub fn worker_name(mut self, pattern: &str) -> Self {
        self.worker_name = Some(pattern.to_string());
        self
    }
}
