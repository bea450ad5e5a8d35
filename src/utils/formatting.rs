//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Decimal hours as `08h 45m` (long) or `08:45` (short).
pub fn hours2readable(hours: f64, short: bool) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let m = total_minutes.abs();

    if short {
        format!("{}{:02}:{:02}", sign, m / 60, m % 60)
    } else {
        format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
    }
}

/// Percentage with one decimal, e.g. `66.7%`.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Horizontal bar for terminal charts: `width` cells for 100%.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.min(width))
}
