/// ANSI color helper utilities for terminal output.
use crate::models::attendance_status::AttendanceStatus;
use crate::models::task::TaskStatus;
use crate::models::worker::WorkerStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Late => RED,
        AttendanceStatus::Absent => GREY,
    }
}

pub fn color_for_worker_status(status: WorkerStatus) -> &'static str {
    match status {
        WorkerStatus::Online => GREEN,
        WorkerStatus::Offline => GREY,
        WorkerStatus::Away => YELLOW,
        WorkerStatus::Invited => MAGENTA,
    }
}

pub fn color_for_task_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::NotStarted => GREY,
        TaskStatus::InProgress => CYAN,
        TaskStatus::Completed => GREEN,
    }
}

/// Attendance percentage color:
/// \>= 90 → green
/// \>= 60 → yellow
/// below → red
pub fn color_for_percentage(value: f64) -> &'static str {
    if value >= 90.0 {
        GREEN
    } else if value >= 60.0 {
        YELLOW
    } else {
        RED
    }
}

/// Grey out placeholders such as `--:--` or an empty cell.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
