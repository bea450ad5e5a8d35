use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored lifecycle of a task. "Overdue" is not stored: it is derived from
/// the deadline when the task is shown (see `Task::is_overdue`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Not Started" => Some(TaskStatus::NotStarted),
            "In Progress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// CLI input: any case, with a space, dash or underscore between words.
    pub fn from_input(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match key.as_str() {
            "notstarted" | "todo" => Some(TaskStatus::NotStarted),
            "inprogress" => Some(TaskStatus::InProgress),
            "completed" | "done" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub worker_id: i64,
    pub name: String,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    /// Percent done, 0..=100. A completed task is always at 100.
    pub progress: u8,
    pub assigned_at: String,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Past its deadline on `today` and not completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.deadline < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_input_is_lenient() {
        assert_eq!(TaskStatus::from_input("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_input("Not Started"), Some(TaskStatus::NotStarted));
        assert_eq!(TaskStatus::from_input("DONE"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_input("overdue"), None);
        assert_eq!(TaskStatus::from_db_str("In Progress"), Some(TaskStatus::InProgress));
    }

    #[test]
    fn overdue_only_when_open_and_past_deadline() {
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut task = Task {
            id: 1,
            worker_id: 1,
            name: "Calibrate sensors".into(),
            status: TaskStatus::InProgress,
            deadline,
            progress: 40,
            assigned_at: String::new(),
        };
        assert!(!task.is_overdue(deadline));
        assert!(task.is_overdue(deadline.succ_opt().unwrap()));

        task.status = TaskStatus::Completed;
        assert!(!task.is_overdue(deadline.succ_opt().unwrap()));
    }
}
