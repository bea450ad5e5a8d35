use crate::core::logic::AttendanceEngine;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{close_event, find_open_event, get_worker, insert_event, set_worker_status};
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::{AttendanceEvent, hours_between};
use crate::models::worker::WorkerStatus;
use chrono::NaiveDateTime;
use tracing::debug;

pub struct SignLogic;

impl SignLogic {
    /// Open a new attendance event for `worker_id` at `at`.
    ///
    /// The status is decided once, here, from the configured cutoff. A worker
    /// that still has an open event must sign out first.
    pub fn sign_in(
        pool: &mut DbPool,
        engine: &AttendanceEngine,
        worker_id: i64,
        at: NaiveDateTime,
    ) -> AppResult<AttendanceEvent> {
        let tx = pool.conn.transaction()?;

        let worker = get_worker(&tx, worker_id)?;

        if let Some(open) = find_open_event(&tx, worker_id)? {
            let day = open
                .day()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "--".to_string());
            return Err(AppError::AlreadySignedIn(worker_id, day));
        }

        let status = engine.late.status_for(at.time());
        let mut event = AttendanceEvent::open(0, worker_id, at, status);
        event.id = insert_event(&tx, &event)?;

        set_worker_status(&tx, worker_id, WorkerStatus::Online)?;

        audit(
            &tx,
            "signin",
            &worker_id.to_string(),
            &format!("{} signed in at {} ({})", worker.name, at, status),
        )?;

        tx.commit()?;
        debug!(worker_id, event_id = event.id, %status, "signed in");
        Ok(event)
    }

    /// Close the worker's open event at `at`, storing the worked hours.
    pub fn sign_out(pool: &mut DbPool, worker_id: i64, at: NaiveDateTime) -> AppResult<AttendanceEvent> {
        let tx = pool.conn.transaction()?;

        let worker = get_worker(&tx, worker_id)?;
        let mut event = find_open_event(&tx, worker_id)?.ok_or(AppError::NotSignedIn(worker_id))?;
        let check_in = event.validated_check_in()?;

        if at < check_in {
            return Err(AppError::MalformedEvent(format!(
                "check-out {at} is before check-in {check_in}"
            )));
        }

        let hours = hours_between(check_in, at);
        close_event(&tx, event.id, &at, hours)?;
        event.check_out = Some(at);
        event.hours = hours;

        set_worker_status(&tx, worker_id, WorkerStatus::Offline)?;

        audit(
            &tx,
            "signout",
            &worker_id.to_string(),
            &format!("{} signed out at {} ({:.2}h)", worker.name, at, hours),
        )?;

        tx.commit()?;
        debug!(worker_id, event_id = event.id, hours, "signed out");
        Ok(event)
    }
}
