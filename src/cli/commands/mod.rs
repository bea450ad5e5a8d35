pub mod backup;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod sign;
pub mod task;
pub mod worker;
