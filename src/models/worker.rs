use serde::{Deserialize, Serialize};
use std::fmt;

/// Presence status shown on the roster. Mutated as a side effect of
/// sign-in (`Online`) and sign-out (`Offline`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    Online,
    Offline,
    Away,
    Invited,
}

impl WorkerStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkerStatus::Online => "Online",
            WorkerStatus::Offline => "Offline",
            WorkerStatus::Away => "Away",
            WorkerStatus::Invited => "Invited",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Online" => Some(WorkerStatus::Online),
            "Offline" => Some(WorkerStatus::Offline),
            "Away" => Some(WorkerStatus::Away),
            "Invited" => Some(WorkerStatus::Invited),
            _ => None,
        }
    }

    /// Helper: parse CLI input (any case)
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "online" => Some(WorkerStatus::Online),
            "offline" => Some(WorkerStatus::Offline),
            "away" => Some(WorkerStatus::Away),
            "invited" => Some(WorkerStatus::Invited),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String, // department
    pub status: WorkerStatus,
    pub created_at: String,
}

impl Worker {
    /// Roster entry with only the fields the aggregation engine reads.
    pub fn new(id: i64, name: &str, role: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: String::new(),
            role: role.to_string(),
            status: WorkerStatus::Offline,
            created_at: String::new(),
        }
    }

    /// Case-insensitive substring match, as used by the log filters.
    pub fn name_matches(&self, pattern: &str) -> bool {
        self.name.to_lowercase().contains(&pattern.to_lowercase())
    }
}
