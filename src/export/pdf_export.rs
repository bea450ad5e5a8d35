use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportRow, rows_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfReport;
use crate::ui::messages::info;
use std::path::Path;

/// Export a titled PDF table, with optional summary lines above it.
pub(crate) fn export_pdf<R: ExportRow>(
    rows: &[R],
    path: &Path,
    title: &str,
    summary: &[String],
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let report = summary
        .iter()
        .fold(PdfReport::new(title), |r, line| r.summary_line(line.as_str()))
        .table(R::headers(), rows_to_table(rows));

    report
        .save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
