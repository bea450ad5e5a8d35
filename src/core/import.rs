use crate::core::calculator::validate_events;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_open_event, insert_event, load_workers};
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::{AttendanceEvent, hours_between};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// Reasons of the events left out with `--skip-invalid`.
    pub skipped: Vec<String>,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Parse a JSON array of attendance events.
    pub fn parse(content: &str) -> AppResult<Vec<AttendanceEvent>> {
        serde_json::from_str(content).map_err(|e| AppError::Other(format!("invalid import file: {e}")))
    }

    /// Load events from `file` in a single transaction.
    ///
    /// Malformed events, events of unknown workers and a second open event
    /// for a worker who is still signed in abort the whole import, unless
    /// `skip_invalid` is set, in which case they are reported and left out.
    /// Stored statuses are kept as given.
    pub fn import(pool: &mut DbPool, file: &Path, skip_invalid: bool) -> AppResult<ImportSummary> {
        let content = fs::read_to_string(file)?;
        let events = Self::parse(&content)?;
        Self::import_events(pool, events, skip_invalid, &file.display().to_string())
    }

    pub fn import_events(
        pool: &mut DbPool,
        events: Vec<AttendanceEvent>,
        skip_invalid: bool,
        source: &str,
    ) -> AppResult<ImportSummary> {
        let (valid, errors) = validate_events(&events);

        let mut summary = ImportSummary::default();
        for e in errors {
            if !skip_invalid {
                return Err(e);
            }
            warn!(error = %e, "skipping event");
            summary.skipped.push(e.to_string());
        }

        let tx = pool.conn.transaction()?;
        let known: BTreeSet<i64> = load_workers(&tx)?.into_iter().map(|w| w.id).collect();

        // day of the open event of each worker, as stored or as imported so far
        let mut open_days: BTreeMap<i64, NaiveDate> = BTreeMap::new();
        for id in &known {
            if let Some(day) = find_open_event(&tx, *id)?.and_then(|e| e.day()) {
                open_days.insert(*id, day);
            }
        }

        for mut ev in valid {
            let rejected = if !known.contains(&ev.worker_id) {
                Some(AppError::WorkerNotFound(ev.worker_id))
            } else if ev.is_open()
                && let Some(day) = open_days.get(&ev.worker_id)
            {
                Some(AppError::AlreadySignedIn(ev.worker_id, day.to_string()))
            } else {
                None
            };

            if let Some(e) = rejected {
                if !skip_invalid {
                    return Err(e);
                }
                warn!(error = %e, "skipping event");
                summary.skipped.push(e.to_string());
                continue;
            }

            if let (Some(i), Some(o)) = (ev.check_in, ev.check_out)
                && ev.hours == 0.0
            {
                ev.hours = hours_between(i, o);
            }

            insert_event(&tx, &ev)?;
            if ev.is_open()
                && let Some(day) = ev.day()
            {
                open_days.insert(ev.worker_id, day);
            }
            summary.imported += 1;
        }

        audit(
            &tx,
            "import",
            source,
            &format!(
                "Imported {} event(s), skipped {}",
                summary.imported,
                summary.skipped.len()
            ),
        )?;
        tx.commit()?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::{insert_worker, load_events};
    use crate::models::attendance_status::AttendanceStatus;
    use crate::models::worker::WorkerStatus;
    use crate::utils::time::parse_datetime;

    const SAMPLE: &str = r#"[
        {"worker_id": 1, "check_in": "2025-03-03T08:30:00", "check_out": "2025-03-03T17:00:00", "status": "Present"},
        {"worker_id": 1, "check_in": null, "status": "Present"},
        {"worker_id": 1, "check_in": "2025-03-04T09:30:00", "status": "Late"}
    ]"#;

    fn pool_with_worker() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        insert_worker(&pool.conn, "Ada", "", "Engineering", WorkerStatus::Offline).unwrap();
        pool
    }

    #[test]
    fn malformed_events_abort_by_default() {
        let mut pool = pool_with_worker();
        let events = ImportLogic::parse(SAMPLE).unwrap();

        let err = ImportLogic::import_events(&mut pool, events, false, "test").unwrap_err();
        assert!(matches!(err, AppError::MalformedEvent(_)));
        assert!(load_events(&pool.conn, None, None).unwrap().is_empty());
    }

    #[test]
    fn skip_invalid_keeps_the_good_ones() {
        let mut pool = pool_with_worker();
        let events = ImportLogic::parse(SAMPLE).unwrap();

        let summary = ImportLogic::import_events(&mut pool, events, true, "test").unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped.len(), 1);

        let stored = load_events(&pool.conn, None, None).unwrap();
        assert_eq!(stored[0].hours, 8.5);
        assert!(stored[1].is_open());
    }

    const TWO_OPEN: &str = r#"[
        {"worker_id": 1, "check_in": "2025-03-03T08:30:00", "status": "Present"},
        {"worker_id": 1, "check_in": "2025-03-03T10:30:00", "status": "Late"}
    ]"#;

    #[test]
    fn second_open_event_of_a_worker_is_rejected() {
        let mut pool = pool_with_worker();
        let events = ImportLogic::parse(TWO_OPEN).unwrap();

        let err = ImportLogic::import_events(&mut pool, events, false, "test").unwrap_err();
        assert!(matches!(err, AppError::AlreadySignedIn(1, ref day) if day == "2025-03-03"));
        assert!(load_events(&pool.conn, None, None).unwrap().is_empty());

        let events = ImportLogic::parse(TWO_OPEN).unwrap();
        let summary = ImportLogic::import_events(&mut pool, events, true, "test").unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped.len(), 1);

        let open: Vec<_> = load_events(&pool.conn, None, None)
            .unwrap()
            .into_iter()
            .filter(|e| e.is_open())
            .collect();
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn open_event_already_stored_blocks_an_imported_one() {
        let mut pool = pool_with_worker();
        let at = parse_datetime("2025-03-03 08:00").unwrap();
        insert_event(&pool.conn, &AttendanceEvent::open(0, 1, at, AttendanceStatus::Present)).unwrap();

        let events = ImportLogic::parse(
            r#"[{"worker_id": 1, "check_in": "2025-03-03T13:00:00", "status": "Late"}]"#,
        )
        .unwrap();
        let err = ImportLogic::import_events(&mut pool, events, false, "test").unwrap_err();
        assert!(matches!(err, AppError::AlreadySignedIn(1, _)));

        // closed events of the same worker still go in
        let events = ImportLogic::parse(
            r#"[{"worker_id": 1, "check_in": "2025-03-02T08:00:00", "check_out": "2025-03-02T16:00:00", "status": "Present"}]"#,
        )
        .unwrap();
        let summary = ImportLogic::import_events(&mut pool, events, false, "test").unwrap();
        assert_eq!(summary.imported, 1);
    }
}
