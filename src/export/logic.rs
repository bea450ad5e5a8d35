use crate::core::calculator::{DateRange, PeriodFilter};
use crate::core::logic::AttendanceEngine;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events, load_workers};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EventExport, ExportRow, RecordExport};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::daily_record::DailyRecord;
use crate::models::worker::Worker;
use crate::ui::messages::warning;
use crate::utils::date::describe_range;
use crate::utils::formatting::pct;
use crate::utils::path::expand_tilde;
use std::collections::BTreeMap;
use std::path::Path;

/// What an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Raw attendance events.
    Events,
    /// Normalized per-worker daily records.
    Records,
}

pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub file: &'a str,
    pub range: Option<DateRange>,
    pub kind: ExportKind,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export events or daily records; returns the number of rows written.
    /// The output path must be absolute (after `~` expansion).
    pub fn export(pool: &DbPool, engine: &AttendanceEngine, req: &ExportRequest<'_>) -> AppResult<usize> {
        let path = expand_tilde(req.file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(&path, req.force)?;

        let roster = load_workers(&pool.conn)?;
        let workers: BTreeMap<i64, &Worker> = roster.iter().map(|w| (w.id, w)).collect();
        let events = load_events(&pool.conn, req.range.as_ref(), None)?;

        if events.is_empty() {
            warning("No events found for selected range.");
            return Ok(0);
        }

        let written = match req.kind {
            ExportKind::Events => {
                let rows: Vec<EventExport> = events
                    .iter()
                    .map(|e| EventExport::new(e, workers.get(&e.worker_id).copied()))
                    .collect();

                let total: f64 = events.iter().map(|e| e.hours).sum();
                let summary = vec![
                    format!("Events: {}", rows.len()),
                    format!("Hours: {total:.2}"),
                ];
                write_rows(&rows, &path, req, "Attendance events", &summary)?
            }
            ExportKind::Records => {
                let records = engine.records(&events)?;
                let rows: Vec<RecordExport> = records
                    .iter()
                    .map(|r| RecordExport::new(r, workers.get(&r.worker_id).copied()))
                    .collect();

                let summary = records_summary(engine, &records, &roster, req.range)?;
                write_rows(&rows, &path, req, "Daily attendance", &summary)?
            }
        };

        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {written} row(s) as {}", req.format.as_str()),
        )?;

        Ok(written)
    }
}

fn write_rows<R: ExportRow>(
    rows: &[R],
    path: &Path,
    req: &ExportRequest<'_>,
    label: &str,
    summary: &[String],
) -> AppResult<usize> {
    match req.format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, path, label)?,
        ExportFormat::Pdf => {
            let title = match &req.range {
                Some(r) => format!("{label}: {}", describe_range(r)),
                None => label.to_string(),
            };
            export_pdf(rows, path, &title, summary)?
        }
    }
    Ok(rows.len())
}

/// Period figures printed above the PDF table of daily records. Without an
/// explicit range the span of the records is used.
fn records_summary(
    engine: &AttendanceEngine,
    records: &[DailyRecord],
    roster: &[Worker],
    range: Option<DateRange>,
) -> AppResult<Vec<String>> {
    let range = match range {
        Some(r) => r,
        None => {
            let first = records.iter().map(|r| r.day).min();
            let last = records.iter().map(|r| r.day).max();
            match (first, last) {
                (Some(f), Some(l)) => DateRange::new(f, l)?,
                _ => return Ok(Vec::new()),
            }
        }
    };

    let stats = engine.period_stats(records, roster, &PeriodFilter::new(range))?;
    Ok(vec![
        format!("Period: {} to {}", stats.from, stats.to),
        format!(
            "Workers: {}   Present: {}   Absent: {}   Late: {}",
            stats.total_workers_in_scope, stats.present_count, stats.absent_count, stats.late_count
        ),
        format!(
            "Attendance: {}   Total hours: {:.2}",
            pct(stats.attendance_percentage),
            stats.total_hours
        ),
    ])
}
