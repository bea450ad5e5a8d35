use crate::core::calculator::DateRange;
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::AttendanceEvent;
use crate::models::attendance_status::AttendanceStatus;
use crate::models::task::{Task, TaskStatus};
use crate::models::worker::{Worker, WorkerStatus};
use crate::utils::time::{from_db_str, now_local, to_db_str};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

// ---------------------------
// Workers
// ---------------------------

pub fn map_worker_row(row: &Row) -> Result<Worker> {
    let status_str: String = row.get("status")?;
    let status = WorkerStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role: row.get("role")?,
        status,
        created_at: row.get("created_at")?,
    })
}

/// Insert a worker and return its new id.
pub fn insert_worker(
    conn: &Connection,
    name: &str,
    email: &str,
    role: &str,
    status: WorkerStatus,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO workers (name, email, role, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            email,
            role,
            status.to_db_str(),
            to_db_str(&now_local())
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_worker(conn: &Connection, id: i64) -> AppResult<Worker> {
    conn.query_row(
        "SELECT * FROM workers WHERE id = ?1",
        [id],
        map_worker_row,
    )
    .optional()?
    .ok_or(AppError::WorkerNotFound(id))
}

/// Whole roster, ordered by id.
pub fn load_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare("SELECT * FROM workers ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_worker_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE workers SET name = ?1, email = ?2, role = ?3, status = ?4
         WHERE id = ?5",
        params![w.name, w.email, w.role, w.status.to_db_str(), w.id],
    )?;
    if changed == 0 {
        return Err(AppError::WorkerNotFound(w.id));
    }
    Ok(())
}

pub fn set_worker_status(conn: &Connection, id: i64, status: WorkerStatus) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE workers SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::WorkerNotFound(id));
    }
    Ok(())
}

/// Delete a worker; their attendance goes with them (ON DELETE CASCADE).
pub fn delete_worker(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM workers WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::WorkerNotFound(id));
    }
    Ok(())
}

// ---------------------------
// Attendance
// ---------------------------

pub fn map_event_row(row: &Row) -> Result<AttendanceEvent> {
    let in_str: String = row.get("check_in")?;
    let check_in =
        from_db_str(&in_str).ok_or_else(|| conversion_error(2, AppError::InvalidTime(in_str)))?;

    let out_str: Option<String> = row.get("check_out")?;
    let check_out = match out_str {
        Some(s) => Some(from_db_str(&s).ok_or_else(|| conversion_error(3, AppError::InvalidTime(s)))?),
        None => None,
    };

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    Ok(AttendanceEvent {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        check_in: Some(check_in),
        check_out,
        status,
        hours: row.get("hours")?,
    })
}

/// Insert an event and return its id. Events without a check-in cannot be
/// stored.
pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<i64> {
    let check_in = ev.validated_check_in()?;

    conn.execute(
        "INSERT INTO attendance (worker_id, check_in, check_out, status, hours, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ev.worker_id,
            to_db_str(&check_in),
            ev.check_out.as_ref().map(to_db_str),
            ev.status.to_db_str(),
            ev.hours,
            to_db_str(&now_local()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Latest event of the worker that has no check-out yet.
pub fn find_open_event(conn: &Connection, worker_id: i64) -> AppResult<Option<AttendanceEvent>> {
    let ev = conn
        .query_row(
            "SELECT * FROM attendance
             WHERE worker_id = ?1 AND check_out IS NULL
             ORDER BY check_in DESC, id DESC
             LIMIT 1",
            [worker_id],
            map_event_row,
        )
        .optional()?;
    Ok(ev)
}

pub fn close_event(conn: &Connection, id: i64, check_out: &NaiveDateTime, hours: f64) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance SET check_out = ?1, hours = ?2 WHERE id = ?3",
        params![to_db_str(check_out), hours, id],
    )?;
    Ok(())
}

/// Events whose check-in day falls in `range` (all events when `None`),
/// optionally restricted to one worker. Ordered by check-in.
pub fn load_events(
    conn: &Connection,
    range: Option<&DateRange>,
    worker_id: Option<i64>,
) -> AppResult<Vec<AttendanceEvent>> {
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    let (from, to) = match range {
        Some(r) => (fmt(r.from()), fmt(r.to())),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE substr(check_in, 1, 10) BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR worker_id = ?3)
         ORDER BY check_in ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![from, to, worker_id], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Tasks
// ---------------------------

pub fn map_task_row(row: &Row) -> Result<Task> {
    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidStatus(status_str.clone())))?;

    let deadline_str: String = row.get("deadline")?;
    let deadline = NaiveDate::parse_from_str(&deadline_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(4, AppError::InvalidDate(deadline_str.clone())))?;

    Ok(Task {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        name: row.get("name")?,
        status,
        deadline,
        progress: row.get("progress")?,
        assigned_at: row.get("assigned_at")?,
    })
}

/// Insert a task assigned now and return its id.
pub fn insert_task(
    conn: &Connection,
    worker_id: i64,
    name: &str,
    status: TaskStatus,
    deadline: NaiveDate,
    progress: u8,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (worker_id, name, status, deadline, progress, assigned_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            worker_id,
            name,
            status.to_db_str(),
            deadline.format("%Y-%m-%d").to_string(),
            progress,
            to_db_str(&now_local())
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_task(conn: &Connection, id: i64) -> AppResult<Task> {
    conn.query_row("SELECT * FROM tasks WHERE id = ?1", [id], map_task_row)
        .optional()?
        .ok_or(AppError::TaskNotFound(id))
}

pub fn update_task(conn: &Connection, t: &Task) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tasks SET name = ?1, status = ?2, deadline = ?3, progress = ?4
         WHERE id = ?5",
        params![
            t.name,
            t.status.to_db_str(),
            t.deadline.format("%Y-%m-%d").to_string(),
            t.progress,
            t.id
        ],
    )?;
    if changed == 0 {
        return Err(AppError::TaskNotFound(t.id));
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::TaskNotFound(id));
    }
    Ok(())
}

/// Tasks by deadline (earliest first), optionally of one worker.
pub fn load_tasks(conn: &Connection, worker_id: Option<i64>) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM tasks
         WHERE (?1 IS NULL OR worker_id = ?1)
         ORDER BY deadline ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![worker_id], map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::utils::time::parse_datetime;

    #[test]
    fn worker_delete_cascades_to_attendance() {
        let pool = DbPool::in_memory().unwrap();
        let conn = &pool.conn;
        let id = insert_worker(conn, "Ada", "", "Engineering", WorkerStatus::Invited).unwrap();

        let at = parse_datetime("2025-03-03 08:30").unwrap();
        insert_event(conn, &AttendanceEvent::open(0, id, at, AttendanceStatus::Present)).unwrap();
        assert_eq!(load_events(conn, None, Some(id)).unwrap().len(), 1);

        delete_worker(conn, id).unwrap();
        assert!(load_events(conn, None, None).unwrap().is_empty());
        assert!(matches!(get_worker(conn, id), Err(AppError::WorkerNotFound(_))));
    }

    #[test]
    fn open_event_is_found_and_closed() {
        let pool = DbPool::in_memory().unwrap();
        let conn = &pool.conn;
        let id = insert_worker(conn, "Bob", "", "Sales", WorkerStatus::Offline).unwrap();

        let at = parse_datetime("2025-03-03 09:10").unwrap();
        let ev_id =
            insert_event(conn, &AttendanceEvent::open(0, id, at, AttendanceStatus::Late)).unwrap();

        let open = find_open_event(conn, id).unwrap().unwrap();
        assert_eq!(open.id, ev_id);

        let out = parse_datetime("2025-03-03 17:40").unwrap();
        close_event(conn, ev_id, &out, 8.5).unwrap();
        assert!(find_open_event(conn, id).unwrap().is_none());

        let stored = &load_events(conn, None, None).unwrap()[0];
        assert_eq!(stored.check_out, Some(out));
        assert_eq!(stored.hours, 8.5);
    }

    #[test]
    fn tasks_load_by_deadline_and_follow_their_worker() {
        let pool = DbPool::in_memory().unwrap();
        let conn = &pool.conn;
        let ada = insert_worker(conn, "Ada", "", "Engineering", WorkerStatus::Offline).unwrap();
        let bob = insert_worker(conn, "Bob", "", "Engineering", WorkerStatus::Offline).unwrap();

        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let late = insert_task(conn, ada, "Patch", TaskStatus::NotStarted, d("2025-03-20"), 0).unwrap();
        let soon = insert_task(conn, ada, "Audit", TaskStatus::InProgress, d("2025-03-12"), 30).unwrap();
        insert_task(conn, bob, "Review", TaskStatus::Completed, d("2025-03-01"), 100).unwrap();

        let ids: Vec<i64> = load_tasks(conn, Some(ada)).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![soon, late]);
        assert_eq!(load_tasks(conn, None).unwrap().len(), 3);

        let mut task = get_task(conn, soon).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        task.progress = 80;
        update_task(conn, &task).unwrap();
        assert_eq!(get_task(conn, soon).unwrap().progress, 80);

        delete_worker(conn, ada).unwrap();
        assert_eq!(load_tasks(conn, None).unwrap().len(), 1);
        assert!(matches!(delete_task(conn, late), Err(AppError::TaskNotFound(_))));
    }
}
