use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::AttendanceEngine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportKind, ExportLogic, ExportRequest};
use crate::utils::date::parse_range;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        records,
        force,
    } = cmd
    {
        let range = match range.as_deref() {
            None | Some("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let req = ExportRequest {
            format: *format,
            file,
            range,
            kind: if *records {
                ExportKind::Records
            } else {
                ExportKind::Events
            },
            force: *force,
        };

        let engine = AttendanceEngine::from_config(cfg)?;
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool, &engine, &req)?;
    }
    Ok(())
}
