use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_task, get_task, get_worker, insert_task, load_tasks, update_task};
use crate::errors::{AppError, AppResult};
use crate::models::task::{Task, TaskStatus};
use crate::utils::colors::{GREEN, GREY, RED, color_for_task_status, paint};
use crate::utils::formatting::bar;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Fields of `task update`; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub progress: Option<u8>,
}

pub struct TaskLogic;

impl TaskLogic {
    fn check_name(name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidTask("name cannot be empty".into()));
        }
        Ok(name.to_string())
    }

    fn check_progress(progress: u8) -> AppResult<u8> {
        if progress > 100 {
            return Err(AppError::InvalidTask(format!(
                "progress must be between 0 and 100, got {progress}"
            )));
        }
        Ok(progress)
    }

    /// Completed pins progress to 100; full progress completes the task.
    fn settle(task: &mut Task) {
        if task.status == TaskStatus::Completed {
            task.progress = 100;
        } else if task.progress == 100 {
            task.status = TaskStatus::Completed;
        }
    }

    pub fn add(
        pool: &mut DbPool,
        worker_id: i64,
        name: &str,
        deadline: NaiveDate,
        status: TaskStatus,
        progress: u8,
    ) -> AppResult<Task> {
        let worker = get_worker(&pool.conn, worker_id)?;
        let name = Self::check_name(name)?;

        let mut draft = Task {
            id: 0,
            worker_id,
            name,
            status,
            deadline,
            progress: Self::check_progress(progress)?,
            assigned_at: String::new(),
        };
        Self::settle(&mut draft);

        let id = insert_task(
            &pool.conn,
            worker_id,
            &draft.name,
            draft.status,
            draft.deadline,
            draft.progress,
        )?;
        audit(
            &pool.conn,
            "task_add",
            &id.to_string(),
            &format!("Assigned '{}' to {} (due {deadline})", draft.name, worker.name),
        )?;
        get_task(&pool.conn, id)
    }

    pub fn update(pool: &mut DbPool, id: i64, changes: TaskChanges) -> AppResult<Task> {
        let mut task = get_task(&pool.conn, id)?;

        if let Some(name) = changes.name {
            task.name = Self::check_name(&name)?;
        }
        if let Some(deadline) = changes.deadline {
            task.deadline = deadline;
        }
        if let Some(progress) = changes.progress {
            task.progress = Self::check_progress(progress)?;
            // lowering progress reopens a completed task
            if progress < 100 && changes.status.is_none() && task.is_completed() {
                task.status = TaskStatus::InProgress;
            }
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        Self::settle(&mut task);

        update_task(&pool.conn, &task)?;
        audit(
            &pool.conn,
            "task_update",
            &id.to_string(),
            &format!("{}: {} ({}%)", task.name, task.status, task.progress),
        )?;
        Ok(task)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Task> {
        let task = get_task(&pool.conn, id)?;
        delete_task(&pool.conn, id)?;
        audit(&pool.conn, "task_del", &id.to_string(), &format!("Deleted '{}'", task.name))?;
        Ok(task)
    }

    /// Tasks ordered by deadline, optionally those of one worker.
    pub fn list(pool: &DbPool, worker_id: Option<i64>) -> AppResult<Vec<Task>> {
        if let Some(id) = worker_id {
            get_worker(&pool.conn, id)?;
        }
        load_tasks(&pool.conn, worker_id)
    }

    /// Progress cell: "Task finished" once completed, a bar otherwise.
    pub fn progress_cell(task: &Task) -> String {
        if task.is_completed() {
            paint(GREEN, "Task finished")
        } else {
            format!("{:<10} {:>3}%", bar(f64::from(task.progress), 100.0, 10), task.progress)
        }
    }

    /// Task table; deadlines already passed on `today` are flagged overdue.
    pub fn print(tasks: &[Task], today: NaiveDate, with_worker: bool) {
        if tasks.is_empty() {
            println!("{}", paint(GREY, "No tasks found."));
            return;
        }

        let mut columns = vec![Column::right("ID")];
        if with_worker {
            columns.push(Column::right("WORKER"));
        }
        columns.extend([
            Column::left("NAME"),
            Column::left("DEADLINE"),
            Column::left("STATUS"),
            Column::left("PROGRESS"),
        ]);
        let mut table = Table::new(columns);

        for t in tasks {
            let deadline = t.deadline.format("%Y-%m-%d").to_string();
            let (deadline, status) = if t.is_overdue(today) {
                (paint(RED, &deadline), paint(RED, "Overdue"))
            } else {
                (deadline, paint(color_for_task_status(t.status), t.status.to_db_str()))
            };

            let mut row = vec![t.id.to_string()];
            if with_worker {
                row.push(t.worker_id.to_string());
            }
            row.extend([t.name.clone(), deadline, status, Self::progress_cell(t)]);
            table.add_row(row);
        }
        print!("{}", table.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::insert_worker;
    use crate::models::worker::WorkerStatus;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pool_with_worker() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        let id = insert_worker(&pool.conn, "Ada", "", "Engineering", WorkerStatus::Offline).unwrap();
        (pool, id)
    }

    #[test]
    fn add_validates_worker_name_and_progress() {
        let (mut pool, ada) = pool_with_worker();

        let t = TaskLogic::add(&mut pool, ada, " Audit ", d("2025-03-12"), TaskStatus::NotStarted, 0).unwrap();
        assert_eq!(t.name, "Audit");
        assert!(!t.assigned_at.is_empty());

        assert!(matches!(
            TaskLogic::add(&mut pool, 99, "Audit", d("2025-03-12"), TaskStatus::NotStarted, 0),
            Err(AppError::WorkerNotFound(99))
        ));
        assert!(matches!(
            TaskLogic::add(&mut pool, ada, "  ", d("2025-03-12"), TaskStatus::NotStarted, 0),
            Err(AppError::InvalidTask(_))
        ));
        assert!(matches!(
            TaskLogic::add(&mut pool, ada, "Audit", d("2025-03-12"), TaskStatus::InProgress, 150),
            Err(AppError::InvalidTask(_))
        ));
    }

    #[test]
    fn completion_and_progress_stay_consistent() {
        let (mut pool, ada) = pool_with_worker();
        let t = TaskLogic::add(&mut pool, ada, "Patch", d("2025-03-12"), TaskStatus::InProgress, 40).unwrap();

        let done = TaskLogic::update(
            &mut pool,
            t.id,
            TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(done.progress, 100);

        let reopened = TaskLogic::update(
            &mut pool,
            t.id,
            TaskChanges {
                progress: Some(70),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(reopened.status, TaskStatus::InProgress);

        let finished = TaskLogic::update(
            &mut pool,
            t.id,
            TaskChanges {
                progress: Some(100),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(finished.status, TaskStatus::Completed);
    }

    #[test]
    fn list_is_ordered_by_deadline_and_checks_the_worker() {
        let (mut pool, ada) = pool_with_worker();
        TaskLogic::add(&mut pool, ada, "Later", d("2025-04-01"), TaskStatus::NotStarted, 0).unwrap();
        TaskLogic::add(&mut pool, ada, "Sooner", d("2025-03-01"), TaskStatus::NotStarted, 0).unwrap();

        let names: Vec<String> = TaskLogic::list(&pool, Some(ada)).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Sooner", "Later"]);
        assert!(matches!(TaskLogic::list(&pool, Some(7)), Err(AppError::WorkerNotFound(7))));

        let removed = TaskLogic::delete(&mut pool, 1).unwrap();
        assert_eq!(removed.name, "Later");
        assert!(matches!(TaskLogic::delete(&mut pool, 1), Err(AppError::TaskNotFound(1))));
    }

    #[test]
    fn progress_cell_shows_finished_or_percent() {
        let (mut pool, ada) = pool_with_worker();
        let open = TaskLogic::add(&mut pool, ada, "Audit", d("2025-03-12"), TaskStatus::InProgress, 60).unwrap();
        let done = TaskLogic::add(&mut pool, ada, "Patch", d("2025-03-12"), TaskStatus::Completed, 0).unwrap();

        assert!(TaskLogic::progress_cell(&open).ends_with(" 60%"));
        assert!(TaskLogic::progress_cell(&done).contains("Task finished"));
    }
}
