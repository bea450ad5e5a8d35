use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

/// A named, idempotent schema change. Applied migrations are recorded in
/// the `log` table with operation `migration_applied`.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250101_0001_create_workers",
        description: "Created workers table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS workers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL DEFAULT '',
            role        TEXT NOT NULL DEFAULT '',
            status      TEXT NOT NULL DEFAULT 'Invited'
                        CHECK(status IN ('Online','Offline','Away','Invited')),
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250101_0002_create_attendance",
        description: "Created attendance table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            check_in    TEXT NOT NULL,
            check_out   TEXT,
            status      TEXT NOT NULL CHECK(status IN ('Present','Late','Absent')),
            hours       REAL NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250101_0003_attendance_indexes",
        description: "Added attendance indexes",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_worker_check_in
            ON attendance(worker_id, check_in);
        CREATE INDEX IF NOT EXISTS idx_attendance_check_in
            ON attendance(check_in);
        "#,
    },
    Migration {
        version: "20250101_0004_create_tasks",
        description: "Created tasks table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'Not Started'
                        CHECK(status IN ('Not Started','In Progress','Completed')),
            deadline    TEXT NOT NULL,
            progress    INTEGER NOT NULL DEFAULT 0 CHECK(progress BETWEEN 0 AND 100),
            assigned_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_tasks_worker_deadline
            ON tasks(worker_id, deadline);
        "#,
    },
];

/// Ensure that the `log` table exists; migrations are tracked in it.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    conn.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    info!(version = m.version, "migration applied");
    Ok(())
}

/// Versions not yet recorded as applied.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            debug!(version = m.version, "migration already applied");
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
