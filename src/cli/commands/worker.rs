use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::worker::{WorkerChanges, WorkerLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::worker::{Worker, WorkerStatus};
use crate::ui::messages::success;
use crate::utils::colors::{GREY, color_for_worker_status, colorize_optional, paint};
use crate::utils::table::{Column, Table};

fn parse_status(s: &str) -> AppResult<WorkerStatus> {
    WorkerStatus::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        WorkerAction::Add { name, email, role } => {
            let w = WorkerLogic::add(&mut pool, cfg, name, email, role)?;
            success(format!("Worker {} added with id {}", w.name, w.id));
        }
        WorkerAction::Edit {
            id,
            name,
            email,
            role,
            status,
        } => {
            let changes = WorkerChanges {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                status: status.as_deref().map(parse_status).transpose()?,
            };
            let w = WorkerLogic::edit(&mut pool, cfg, *id, changes)?;
            success(format!("Worker {} updated", w.id));
        }
        WorkerAction::Del { id } => {
            let w = WorkerLogic::delete(&mut pool, *id)?;
            success(format!("Worker {} ({}) deleted", w.id, w.name));
        }
        WorkerAction::Status { id, status } => {
            let status = parse_status(status)?;
            WorkerLogic::set_status(&mut pool, *id, status)?;
            success(format!("Worker {id} is now {status}"));
        }
        WorkerAction::List { name, role } => {
            let workers = WorkerLogic::list(&pool, name.as_deref(), role.as_deref())?;
            print_workers(&workers);
        }
    }

    Ok(())
}

fn print_workers(workers: &[Worker]) {
    if workers.is_empty() {
        println!("{}", paint(GREY, "No workers found."));
        return;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("NAME"),
        Column::left("EMAIL"),
        Column::left("ROLE"),
        Column::left("STATUS"),
    ]);
    for w in workers {
        table.add_row(vec![
            w.id.to_string(),
            w.name.clone(),
            colorize_optional(&w.email),
            colorize_optional(&w.role),
            paint(color_for_worker_status(w.status), w.status.to_db_str()),
        ]);
    }
    print!("{}", table.render());
}
