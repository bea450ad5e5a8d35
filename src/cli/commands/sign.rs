use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::AttendanceEngine;
use crate::core::sign::SignLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::hours2readable;
use crate::utils::time::datetime_or_now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Signin { worker_id, at } => {
            let at = datetime_or_now(at.as_ref())?;
            let engine = AttendanceEngine::from_config(cfg)?;
            let mut pool = DbPool::new(&cfg.database)?;

            let ev = SignLogic::sign_in(&mut pool, &engine, *worker_id, at)?;
            if ev.status.is_late() {
                warning(format!(
                    "Worker {} signed in late at {} (cutoff {})",
                    worker_id,
                    ev.check_in_str(),
                    engine.late.cutoff.format("%H:%M")
                ));
            } else {
                success(format!("Worker {} signed in at {}", worker_id, ev.check_in_str()));
            }
        }
        Commands::Signout { worker_id, at } => {
            let at = datetime_or_now(at.as_ref())?;
            let mut pool = DbPool::new(&cfg.database)?;

            let ev = SignLogic::sign_out(&mut pool, *worker_id, at)?;
            success(format!(
                "Worker {} signed out at {} ({} worked)",
                worker_id,
                ev.check_out_str(),
                hours2readable(ev.hours, false)
            ));
        }
        _ => {}
    }

    Ok(())
}
