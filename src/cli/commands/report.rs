use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::PeriodFilter;
use crate::core::logic::AttendanceEngine;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{date_or_today, last_n_days, parse_range};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        range,
        department,
        name,
        until,
        json,
    } = cmd
    {
        let engine = AttendanceEngine::from_config(cfg)?;
        let range = match range {
            Some(r) => parse_range(r)?,
            None => last_n_days(date_or_today(until.as_ref())?, cfg.report_default_days)?,
        };

        let mut filter = PeriodFilter::new(range);
        if let Some(d) = department {
            filter = filter.department(d);
        }
        if let Some(n) = name {
            filter = filter.worker_name(n);
        }

        let pool = DbPool::new(&cfg.database)?;
        let stats = ReportLogic::build(&pool, &engine, &filter)?;

        if *json {
            println!("{}", ReportLogic::to_json(&stats)?);
        } else {
            ReportLogic::print(&stats, &filter, &cfg.organization);
        }
    }
    Ok(())
}
