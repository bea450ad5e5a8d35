pub mod attendance_event;
pub mod attendance_status;
pub mod daily_record;
pub mod period_stats;
pub mod task;
pub mod worker;
