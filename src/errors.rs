//! Unified application error type.
//! Engine, database, CLI and export code all return AppError so the
//! binary has a single place where failures are reported.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Attendance engine
    // ---------------------------
    #[error("Malformed attendance event: {0}")]
    MalformedEvent(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // ---------------------------
    // Roster / sign-in logic
    // ---------------------------
    #[error("Worker not found: {0}")]
    WorkerNotFound(i64),

    #[error("Worker {0} is already signed in on {1}")]
    AlreadySignedIn(i64, String),

    #[error("Worker {0} is not signed in")]
    NotSignedIn(i64),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    // ---------------------------
    // Tasks
    // ---------------------------
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
