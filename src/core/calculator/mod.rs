//! Attendance aggregation engine.
//!
//! Pure functions over in-memory data: events are normalized into daily
//! records, which then feed the streak calculator and the period
//! aggregator. Nothing in here touches the database, the clock or the
//! terminal.

pub mod aggregator;
pub mod filter;
pub mod lateness;
pub mod normalizer;
pub mod streak;

pub use aggregator::{HourBuckets, aggregate};
pub use filter::{DateRange, PeriodFilter};
pub use lateness::LatePolicy;
pub use normalizer::{NormalizeOptions, StatusMode, normalize, validate_events};
pub use streak::{StreakAnchor, StreakPolicy, compute_streak, compute_streaks};
