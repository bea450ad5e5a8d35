use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let workers: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM workers", [], |row| row.get(0))?;
    let events: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE check_out IS NULL",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Workers:{} {}{}{}", CYAN, RESET, GREEN, workers, RESET);
    println!("{}• Attendance events:{} {}{}{}", CYAN, RESET, GREEN, events, RESET);
    println!("{}• Open events:{} {}", CYAN, RESET, open);

    let bound = |order: &str| -> AppResult<Option<String>> {
        let sql = format!(
            "SELECT substr(check_in, 1, 10) FROM attendance ORDER BY check_in {order} LIMIT 1"
        );
        Ok(pool.conn.query_row(&sql, [], |row| row.get(0)).optional()?)
    };
    let first_date = bound("ASC")?;
    let last_date = bound("DESC")?;

    let placeholder = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first_date.clone().unwrap_or_else(placeholder));
    println!("    to:   {}", last_date.clone().unwrap_or_else(placeholder));

    if let (Some(d1), Some(d2)) = (
        first_date.as_deref().and_then(parse_date),
        last_date.as_deref().and_then(parse_date),
    ) {
        let days = (d2 - d1).num_days() + 1;
        let avg = events as f64 / days as f64;
        println!("{}• Average events/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
