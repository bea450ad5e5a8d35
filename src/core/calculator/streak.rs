//! Attendance streak: consecutive attended days ending at the anchor day.

use crate::models::daily_record::DailyRecord;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which day the backward walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakAnchor {
    /// `as_of` must have an attended record, otherwise the streak is 0.
    #[default]
    Today,
    /// Start from `as_of` when attended, else from the day before.
    /// A worker who has not signed in yet today keeps yesterday's streak.
    TodayOrYesterday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakPolicy {
    pub anchor: StreakAnchor,
    /// Maximum number of days scanned; also the largest value reported.
    pub max_lookback_days: u32,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            anchor: StreakAnchor::Today,
            max_lookback_days: 30,
        }
    }
}

/// Streak of a single worker as of `as_of`.
///
/// `records` are expected to belong to one worker; days after `as_of` are
/// ignored. The walk stops at the first day without an attended record or
/// after `max_lookback_days` days, whichever comes first.
pub fn compute_streak(records: &[DailyRecord], as_of: NaiveDate, policy: &StreakPolicy) -> u32 {
    let attended: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| r.attended && r.day <= as_of)
        .map(|r| r.day)
        .collect();

    let start = match policy.anchor {
        StreakAnchor::Today => Some(as_of),
        StreakAnchor::TodayOrYesterday => {
            if attended.contains(&as_of) {
                Some(as_of)
            } else {
                as_of.pred_opt()
            }
        }
    };

    let Some(start) = start else {
        return 0;
    };

    let mut streak = 0;
    while streak < policy.max_lookback_days {
        let Some(day) = start.checked_sub_days(Days::new(u64::from(streak))) else {
            break;
        };
        if !attended.contains(&day) {
            break;
        }
        streak += 1;
    }

    streak
}

/// Streaks for every worker present in `records`.
pub fn compute_streaks(
    records: &[DailyRecord],
    as_of: NaiveDate,
    policy: &StreakPolicy,
) -> BTreeMap<i64, u32> {
    let mut by_worker: BTreeMap<i64, Vec<DailyRecord>> = BTreeMap::new();
    for r in records {
        by_worker.entry(r.worker_id).or_default().push(r.clone());
    }

    by_worker
        .into_iter()
        .map(|(worker_id, recs)| (worker_id, compute_streak(&recs, as_of, policy)))
        .collect()
}
