//! Engine facade: the attendance calculator configured from `Config`.

use crate::config::Config;
use crate::core::calculator::{
    HourBuckets, LatePolicy, NormalizeOptions, PeriodFilter, StreakPolicy, aggregate,
    compute_streak, compute_streaks, normalize,
};
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::AttendanceEvent;
use crate::models::daily_record::DailyRecord;
use crate::models::period_stats::PeriodStats;
use crate::models::worker::Worker;
use crate::utils::time::parse_time;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Upper bound for day-count settings (`streak_max_days`,
/// `report_default_days`).
pub const MAX_WINDOW_DAYS: u32 = 3660;

fn check_window(key: &str, days: u32) -> AppResult<u32> {
    if (1..=MAX_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(AppError::Config(format!(
            "{key} must be between 1 and {MAX_WINDOW_DAYS}, got {days}"
        )))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceEngine {
    pub late: LatePolicy,
    pub normalize: NormalizeOptions,
    pub streak: StreakPolicy,
    pub buckets: HourBuckets,
}

impl AttendanceEngine {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let cutoff = parse_time(&cfg.late_cutoff).ok_or_else(|| {
            AppError::Config(format!("late_cutoff '{}' is not HH:MM", cfg.late_cutoff))
        })?;

        let buckets = HourBuckets::new(&cfg.hourly_buckets)
            .map_err(|e| AppError::Config(format!("hourly_buckets: {e}")))?;

        let max_lookback_days = check_window("streak_max_days", cfg.streak_max_days)?;
        check_window("report_default_days", cfg.report_default_days)?;

        Ok(Self {
            late: LatePolicy::new(cutoff),
            normalize: NormalizeOptions {
                cutoff,
                mode: cfg.status_mode,
            },
            streak: StreakPolicy {
                anchor: cfg.streak_anchor,
                max_lookback_days,
            },
            buckets,
        })
    }

    pub fn records(&self, events: &[AttendanceEvent]) -> AppResult<Vec<DailyRecord>> {
        normalize(events, &self.normalize)
    }

    pub fn streak(&self, records: &[DailyRecord], as_of: NaiveDate) -> u32 {
        compute_streak(records, as_of, &self.streak)
    }

    pub fn streaks(&self, records: &[DailyRecord], as_of: NaiveDate) -> BTreeMap<i64, u32> {
        compute_streaks(records, as_of, &self.streak)
    }

    pub fn period_stats(
        &self,
        records: &[DailyRecord],
        roster: &[Worker],
        filter: &PeriodFilter,
    ) -> AppResult<PeriodStats> {
        aggregate(records, roster, filter, &self.buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::{StatusMode, StreakAnchor};
    use chrono::NaiveTime;

    #[test]
    fn engine_follows_config() {
        let mut cfg = Config::default();
        cfg.late_cutoff = "08:30".into();
        cfg.status_mode = StatusMode::RecomputeFromCutoff;
        cfg.streak_anchor = StreakAnchor::TodayOrYesterday;
        cfg.streak_max_days = 7;
        cfg.hourly_buckets = vec![10, 8];

        let engine = AttendanceEngine::from_config(&cfg).unwrap();
        assert_eq!(engine.late.cutoff, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(engine.normalize.mode, StatusMode::RecomputeFromCutoff);
        assert_eq!(engine.streak.max_lookback_days, 7);
        assert_eq!(engine.buckets.hours(), &[8, 10]);
    }

    #[test]
    fn bad_cutoff_is_a_config_error() {
        let mut cfg = Config::default();
        cfg.late_cutoff = "nine".into();
        assert!(matches!(
            AttendanceEngine::from_config(&cfg),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn out_of_range_windows_are_config_errors() {
        for days in [0, MAX_WINDOW_DAYS + 1, u32::MAX] {
            let mut cfg = Config::default();
            cfg.streak_max_days = days;
            let err = AttendanceEngine::from_config(&cfg).unwrap_err();
            assert!(err.to_string().contains("streak_max_days"), "{err}");
        }

        let mut cfg = Config::default();
        cfg.report_default_days = 0;
        assert!(matches!(
            AttendanceEngine::from_config(&cfg),
            Err(AppError::Config(_))
        ));

        cfg.report_default_days = MAX_WINDOW_DAYS;
        cfg.streak_max_days = MAX_WINDOW_DAYS;
        assert!(AttendanceEngine::from_config(&cfg).is_ok());
    }
}
