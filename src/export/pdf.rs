//! Minimal multi-page PDF report: a title, a few summary lines and a
//! paginated table, drawn with the built-in Helvetica font.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::io;
use std::path::Path;

// A4 landscape, points.
const PAGE_W: f32 = 842.0;
const PAGE_H: f32 = 595.0;
const MARGIN: f32 = 40.0;
const ROW_H: f32 = 18.0;
const TITLE_SIZE: f32 = 15.0;
const TEXT_SIZE: f32 = 9.0;
const HEADER_SIZE: f32 = 10.0;

const FONT: Name<'static> = Name(b"F1");

/// Helvetica is a WinAnsi font: anything outside printable ASCII is
/// replaced.
fn pdf_text(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

pub struct PdfReport {
    title: String,
    summary: Vec<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PdfReport {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            summary: Vec::new(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn summary_line(mut self, line: impl Into<String>) -> Self {
        self.summary.push(line.into());
        self
    }

    pub fn table(mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        self.headers = headers.iter().map(|h| h.to_string()).collect();
        self.rows = rows;
        self
    }

    /// Column widths proportional to the longest cell, scaled down to fit
    /// the printable width.
    fn column_widths(&self) -> Vec<f32> {
        let mut widths: Vec<f32> = self.headers.iter().map(|h| h.len() as f32 * 6.0 + 10.0).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(cell.len() as f32 * 5.2 + 10.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let available = PAGE_W - 2.0 * MARGIN;
        if total > available {
            let scale = available / total;
            widths.iter_mut().for_each(|w| *w *= scale);
        }
        widths
    }

    /// Rows that fit on a page below `top`.
    fn rows_fitting(top: f32) -> usize {
        (((top - MARGIN) / ROW_H).floor() as usize).saturating_sub(1).max(1)
    }

    fn text(content: &mut Content, x: f32, y: f32, size: f32, s: &str) {
        content
            .begin_text()
            .set_font(FONT, size)
            .next_line(x, y)
            .show(Str(&pdf_text(s)))
            .end_text();
    }

    fn row(content: &mut Content, y: f32, widths: &[f32], cells: &[String], size: f32, fill: Option<f32>) {
        let total: f32 = widths.iter().sum();
        if let Some(grey) = fill {
            content.save_state();
            content.set_fill_gray(grey);
            content.rect(MARGIN, y, total, ROW_H);
            content.fill_nonzero();
            content.restore_state();
        }

        let mut x = MARGIN;
        for (w, cell) in widths.iter().zip(cells) {
            Self::text(content, x + 3.0, y + 5.0, size, cell);
            x += w;
        }

        content.save_state();
        content.set_stroke_gray(0.7);
        content.move_to(MARGIN, y);
        content.line_to(MARGIN + total, y);
        content.stroke();
        content.restore_state();
    }

    fn render_page(&self, page_no: usize, first: bool, rows: &[Vec<String>], widths: &[f32]) -> Vec<u8> {
        let mut content = Content::new();
        let mut y = PAGE_H - MARGIN - TITLE_SIZE;

        Self::text(&mut content, MARGIN, y, TITLE_SIZE, &self.title);
        y -= ROW_H * 1.5;

        if first {
            for line in &self.summary {
                Self::text(&mut content, MARGIN, y, TEXT_SIZE + 1.0, line);
                y -= ROW_H;
            }
            if !self.summary.is_empty() {
                y -= ROW_H / 2.0;
            }
        }

        if !self.headers.is_empty() {
            Self::row(&mut content, y, widths, &self.headers, HEADER_SIZE, Some(0.85));
            y -= ROW_H;
        }

        for (i, r) in rows.iter().enumerate() {
            let fill = (i % 2 == 1).then_some(0.96);
            Self::row(&mut content, y, widths, r, TEXT_SIZE, fill);
            y -= ROW_H;
        }

        Self::text(
            &mut content,
            PAGE_W - MARGIN - 50.0,
            MARGIN / 2.0,
            TEXT_SIZE,
            &format!("Page {page_no}"),
        );

        content.finish().to_vec()
    }

    /// Top of the table area on the first page and on later pages.
    fn table_tops(&self) -> (f32, f32) {
        let later = PAGE_H - MARGIN - TITLE_SIZE - ROW_H * 1.5;
        let summary = self.summary.len() as f32 * ROW_H
            + if self.summary.is_empty() { 0.0 } else { ROW_H / 2.0 };
        (later - summary, later)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let widths = self.column_widths();
        let (first_top, later_top) = self.table_tops();

        // Split rows into pages; there is always at least one page.
        let mut pages: Vec<&[Vec<String>]> = Vec::new();
        let mut rest: &[Vec<String>] = &self.rows;
        let mut capacity = Self::rows_fitting(first_top);
        loop {
            let take = capacity.min(rest.len());
            pages.push(&rest[..take]);
            rest = &rest[take..];
            if rest.is_empty() {
                break;
            }
            capacity = Self::rows_fitting(later_top);
        }

        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let font_id = Ref::new(3);
        let mut next = 4;
        let mut alloc = || {
            let r = Ref::new(next);
            next += 1;
            r
        };

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        let mut kids = Vec::with_capacity(pages.len());
        for (i, rows) in pages.iter().enumerate() {
            let page_id = alloc();
            let content_id = alloc();
            kids.push(page_id);

            {
                let mut page = pdf.page(page_id);
                page.media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                    .parent(tree_id)
                    .contents(content_id);
                page.resources().fonts().pair(FONT, font_id);
            }

            let stream = self.render_page(i + 1, i == 0, rows, &widths);
            pdf.stream(content_id, &stream);
        }

        pdf.pages(tree_id).kids(kids.iter().copied()).count(kids.len() as i32);

        pdf.finish()
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_tables_span_several_pages() {
        let rows: Vec<Vec<String>> = (0..100).map(|i| vec![i.to_string(), "x".into()]).collect();
        let bytes = PdfReport::new("Attendance")
            .summary_line("Present: 3")
            .table(&["id", "name"], rows)
            .to_bytes();

        assert!(bytes.starts_with(b"%PDF"));
        // 23 rows fit under the summary, 25 on later pages
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 5"));
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(pdf_text("Café"), b"Caf?".to_vec());
    }
}
