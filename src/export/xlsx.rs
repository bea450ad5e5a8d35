use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{date_serial, datetime_serial, time_serial};
use crate::export::model::{Cell, ExportRow};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx<R: ExportRow>(rows: &[R], path: &Path, sheet: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).map_err(xlsx_error)?;

    let headers = R::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (i, item) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        let band = if i % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        for (col, cell) in item.cells().iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(cell.display().as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<()> {
    let fmt = base_format(bg);

    match cell {
        Cell::Text(s) => ws.write_with_format(row, col, s.as_str(), &fmt),
        Cell::Int(i) => ws.write_with_format(row, col, *i as f64, &fmt.set_align(FormatAlign::Right)),
        Cell::Number(n) => ws.write_with_format(
            row,
            col,
            *n,
            &fmt.set_num_format("0.00").set_align(FormatAlign::Right),
        ),
        Cell::Date(d) => ws.write_with_format(row, col, date_serial(*d), &fmt.set_num_format("yyyy-mm-dd")),
        Cell::DateTime(t) => ws.write_with_format(
            row,
            col,
            datetime_serial(*t),
            &fmt.set_num_format("yyyy-mm-dd hh:mm"),
        ),
        Cell::Time(t) => ws.write_with_format(row, col, time_serial(*t), &fmt.set_num_format("hh:mm")),
        Cell::Bool(b) => ws.write_with_format(row, col, *b, &fmt),
        Cell::Empty => ws.write_blank(row, col, &fmt),
    }
    .map_err(xlsx_error)?;

    Ok(())
}

fn xlsx_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX export error: {e}"))
}
