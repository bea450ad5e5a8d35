use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::core::logic::AttendanceEngine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { worker, date } = cmd {
        let day = date_or_today(date.as_ref())?;
        let engine = AttendanceEngine::from_config(cfg)?;
        let pool = DbPool::new(&cfg.database)?;

        match worker {
            Some(id) => {
                let view = DashboardLogic::worker_view(&pool, &engine, *id, day)?;
                DashboardLogic::print_worker(&view);
            }
            None => {
                let view = DashboardLogic::admin_view(&pool, &engine, day)?;
                DashboardLogic::print_admin(&view);
            }
        }
    }
    Ok(())
}
