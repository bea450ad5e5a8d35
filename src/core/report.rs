use crate::core::calculator::PeriodFilter;
use crate::core::logic::AttendanceEngine;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events, load_workers};
use crate::errors::{AppError, AppResult};
use crate::models::period_stats::PeriodStats;
use crate::ui::messages::header;
use crate::utils::colors::{color_for_percentage, paint};
use crate::utils::date::describe_range;
use crate::utils::formatting::{bar, pct};
use crate::utils::table::{Column, Table};

pub struct ReportLogic;

impl ReportLogic {
    pub fn build(pool: &DbPool, engine: &AttendanceEngine, filter: &PeriodFilter) -> AppResult<PeriodStats> {
        let roster = load_workers(&pool.conn)?;
        let events = load_events(&pool.conn, Some(&filter.range), None)?;
        let records = engine.records(&events)?;
        engine.period_stats(&records, &roster, filter)
    }

    pub fn to_json(stats: &PeriodStats) -> AppResult<String> {
        serde_json::to_string_pretty(stats).map_err(|e| AppError::Export(e.to_string()))
    }

    pub fn print(stats: &PeriodStats, filter: &PeriodFilter, organization: &str) {
        let title = if organization.is_empty() {
            format!("Attendance report: {}", describe_range(&filter.range))
        } else {
            format!("{organization}: {}", describe_range(&filter.range))
        };
        header(title);

        if let Some(d) = &filter.department {
            println!("{:<14} {}", "Department:", d);
        }
        if let Some(n) = &filter.worker_name {
            println!("{:<14} *{}*", "Name:", n);
        }
        println!("{:<14} {}", "Workers:", stats.total_workers_in_scope);
        println!("{:<14} {}", "Present:", stats.present_count);
        println!("{:<14} {}", "Absent:", stats.absent_count);
        println!("{:<14} {}", "Late arrivals:", stats.late_count);
        println!(
            "{:<14} {}",
            "Attendance:",
            paint(
                color_for_percentage(stats.attendance_percentage),
                &pct(stats.attendance_percentage)
            )
        );
        println!("{:<14} {:.2}", "Total hours:", stats.total_hours);

        header("Daily trend");
        let mut daily = Table::new(vec![
            Column::left("DAY"),
            Column::right("PRESENT"),
            Column::right("LATE"),
            Column::right("RATE"),
            Column::left(""),
        ]);
        for d in &stats.daily {
            daily.add_row(vec![
                d.day.format("%Y-%m-%d %a").to_string(),
                d.present.to_string(),
                d.late.to_string(),
                pct(d.attendance_percentage),
                bar(d.attendance_percentage, 100.0, 20),
            ]);
        }
        print!("{}", daily.render());

        header("Hours by department");
        let mut depts = Table::new(vec![Column::left("DEPARTMENT"), Column::right("HOURS")]);
        for d in &stats.department_hours {
            let name = if d.department.is_empty() {
                "-".to_string()
            } else {
                d.department.clone()
            };
            depts.add_row(vec![name, format!("{:.2}", d.hours)]);
        }
        print!("{}", depts.render());
    }
}
