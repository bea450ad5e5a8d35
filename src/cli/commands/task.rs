use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::core::task::{TaskChanges, TaskLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::task::TaskStatus;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;

fn parse_status(s: &str) -> AppResult<TaskStatus> {
    TaskStatus::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

fn parse_deadline(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TaskAction::Add {
            worker_id,
            name,
            deadline,
            status,
            progress,
        } => {
            let t = TaskLogic::add(
                &mut pool,
                *worker_id,
                name,
                parse_deadline(deadline)?,
                parse_status(status)?,
                *progress,
            )?;
            success(format!("Task {} added with id {}", t.name, t.id));
        }
        TaskAction::List { worker } => {
            let tasks = TaskLogic::list(&pool, *worker)?;
            TaskLogic::print(&tasks, today(), worker.is_none());
        }
        TaskAction::Update {
            id,
            name,
            deadline,
            status,
            progress,
        } => {
            let changes = TaskChanges {
                name: name.clone(),
                deadline: deadline.as_deref().map(parse_deadline).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                progress: *progress,
            };
            let t = TaskLogic::update(&mut pool, *id, changes)?;
            success(format!("Task {} is {} ({}%)", t.id, t.status, t.progress));
        }
        TaskAction::Del { id } => {
            let t = TaskLogic::delete(&mut pool, *id)?;
            success(format!("Task {} ({}) deleted", t.id, t.name));
        }
    }

    Ok(())
}
