use crate::core::calculator::DateRange;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events, load_workers};
use crate::errors::AppResult;
use crate::models::attendance_event::AttendanceEvent;
use crate::models::worker::Worker;
use crate::utils::colors::{GREY, color_for_status, colorize_optional, paint};
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use std::collections::BTreeMap;

/// One line of the attendance log: the event and who it belongs to.
pub struct LogRow {
    pub event: AttendanceEvent,
    pub worker: Worker,
}

pub struct ListLogic;

impl ListLogic {
    /// Attendance log filtered by period, worker name substring and role.
    pub fn rows(
        pool: &DbPool,
        range: Option<&DateRange>,
        name: Option<&str>,
        role: Option<&str>,
    ) -> AppResult<Vec<LogRow>> {
        let workers: BTreeMap<i64, Worker> = load_workers(&pool.conn)?
            .into_iter()
            .filter(|w| name.is_none_or(|n| w.name_matches(n)))
            .filter(|w| role.is_none_or(|r| w.role == r))
            .map(|w| (w.id, w))
            .collect();

        Ok(load_events(&pool.conn, range, None)?
            .into_iter()
            .filter_map(|event| {
                workers
                    .get(&event.worker_id)
                    .map(|w| LogRow { worker: w.clone(), event })
            })
            .collect())
    }

    pub fn print(rows: &[LogRow]) {
        if rows.is_empty() {
            println!("{}", paint(GREY, "No attendance events found."));
            return;
        }

        let mut table = Table::new(vec![
            Column::left("DATE"),
            Column::right("ID"),
            Column::left("WORKER"),
            Column::left("ROLE"),
            Column::left("IN"),
            Column::left("OUT"),
            Column::left("STATUS"),
            Column::right("HOURS"),
        ]);

        let mut total = 0.0;
        for r in rows {
            let e = &r.event;
            total += e.hours;
            table.add_row(vec![
                e.day().map(|d| d.to_string()).unwrap_or_default(),
                e.id.to_string(),
                r.worker.name.clone(),
                colorize_optional(&r.worker.role),
                e.check_in_str(),
                colorize_optional(&e.check_out_str()),
                paint(color_for_status(e.status), e.status.to_db_str()),
                format!("{:.2}", e.hours),
            ]);
        }

        print!("{}", table.render());
        println!("\n{} event(s), {} worked", rows.len(), hours2readable(total, false));
    }
}
