pub mod backup;
pub mod calculator;
pub mod config;
pub mod dashboard;
pub mod import;
pub mod list;
pub mod log;
pub mod logic;
pub mod report;
pub mod sign;
pub mod task;
pub mod worker;
