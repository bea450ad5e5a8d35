use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::DateRange;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{parse_range, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        name,
        role,
        today: only_today,
    } = cmd
    {
        let range = if *only_today {
            Some(DateRange::single(today()))
        } else {
            match period.as_deref() {
                None | Some("all") => None,
                Some(p) => Some(parse_range(p)?),
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        let rows = ListLogic::rows(&pool, range.as_ref(), name.as_deref(), role.as_deref())?;
        ListLogic::print(&rows);
    }
    Ok(())
}
