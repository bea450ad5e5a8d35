use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_worker, get_worker, insert_worker, load_workers, set_worker_status, update_worker};
use crate::errors::{AppError, AppResult};
use crate::models::worker::{Worker, WorkerStatus};

/// Fields of `worker edit`; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct WorkerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<WorkerStatus>,
}

pub struct WorkerLogic;

impl WorkerLogic {
    /// An empty `departments` list in the config accepts any role.
    fn check_role(cfg: &Config, role: &str) -> AppResult<()> {
        if cfg.departments.is_empty() || cfg.departments.iter().any(|d| d == role) {
            Ok(())
        } else {
            Err(AppError::UnknownDepartment(role.to_string()))
        }
    }

    /// New workers start as `Invited` until their first sign-in.
    pub fn add(pool: &mut DbPool, cfg: &Config, name: &str, email: &str, role: &str) -> AppResult<Worker> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("worker name cannot be empty".into()));
        }
        Self::check_role(cfg, role)?;

        let id = insert_worker(&pool.conn, name, email, role, WorkerStatus::Invited)?;
        audit(&pool.conn, "worker_add", &id.to_string(), &format!("Added {name} ({role})"))?;
        get_worker(&pool.conn, id)
    }

    pub fn edit(pool: &mut DbPool, cfg: &Config, id: i64, changes: WorkerChanges) -> AppResult<Worker> {
        let mut worker = get_worker(&pool.conn, id)?;

        if let Some(role) = changes.role {
            Self::check_role(cfg, &role)?;
            worker.role = role;
        }
        if let Some(name) = changes.name {
            worker.name = name;
        }
        if let Some(email) = changes.email {
            worker.email = email;
        }
        if let Some(status) = changes.status {
            worker.status = status;
        }

        update_worker(&pool.conn, &worker)?;
        audit(&pool.conn, "worker_edit", &id.to_string(), &format!("Updated {}", worker.name))?;
        Ok(worker)
    }

    pub fn set_status(pool: &mut DbPool, id: i64, status: WorkerStatus) -> AppResult<()> {
        set_worker_status(&pool.conn, id, status)?;
        audit(&pool.conn, "worker_status", &id.to_string(), &format!("Status set to {status}"))
    }

    /// Remove a worker together with their attendance history.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Worker> {
        let worker = get_worker(&pool.conn, id)?;
        delete_worker(&pool.conn, id)?;
        audit(&pool.conn, "worker_del", &id.to_string(), &format!("Deleted {}", worker.name))?;
        Ok(worker)
    }

    /// Roster, optionally filtered by name substring and exact role.
    pub fn list(pool: &DbPool, name: Option<&str>, role: Option<&str>) -> AppResult<Vec<Worker>> {
        Ok(load_workers(&pool.conn)?
            .into_iter()
            .filter(|w| name.is_none_or(|n| w.name_matches(n)))
            .filter(|w| role.is_none_or(|r| w.role == r))
            .collect())
    }
}
