use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "signin" => Colour::Green,
        "signout" => Colour::Cyan,
        "worker_add" => Colour::Green,
        "worker_del" => Colour::Red,
        "worker_edit" | "worker_status" => Colour::Yellow,
        "task_add" => Colour::Green,
        "task_update" => Colour::Yellow,
        "task_del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "import" | "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        // oldest first on screen
        let mut entries = load_log(&pool.conn, limit)?;
        entries.reverse();

        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| op_target(&e.operation, &e.target).chars().count())
            .max()
            .unwrap_or(10)
            .min(60);

        println!("Internal log:\n");

        for e in entries {
            let plain = truncate(&op_target(&e.operation, &e.target), 60);
            let padding = " ".repeat(op_w.saturating_sub(plain.chars().count()));

            // only the operation word is coloured
            let colored = match plain.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color_for_operation(&e.operation).paint(op), rest),
                None => color_for_operation(&e.operation).paint(plain.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

fn op_target(operation: &str, target: &str) -> String {
    if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    }
}
