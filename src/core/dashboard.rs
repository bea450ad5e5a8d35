//! Worker and admin dashboards: a single day seen from one worker, or from
//! the whole roster.

use crate::core::calculator::{DateRange, PeriodFilter};
use crate::core::logic::AttendanceEngine;
use crate::db::pool::DbPool;
use crate::core::task::TaskLogic;
use crate::db::queries::{get_worker, load_events, load_tasks, load_workers};
use crate::errors::AppResult;
use crate::models::attendance_event::AttendanceEvent;
use crate::models::daily_record::DailyRecord;
use crate::models::period_stats::PeriodStats;
use crate::models::task::Task;
use crate::models::worker::Worker;
use crate::ui::messages::header;
use crate::utils::colors::{
    GREEN, GREY, RED, color_for_percentage, color_for_status, color_for_worker_status, colorize_optional, paint,
};
use crate::utils::date::last_n_days;
use crate::utils::formatting::{bar, bold, pct};
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct WorkerDashboard {
    pub worker: Worker,
    pub day: NaiveDate,
    pub events: Vec<AttendanceEvent>,
    pub record: Option<DailyRecord>,
    pub streak: u32,
    /// Assigned tasks, earliest deadline first.
    pub tasks: Vec<Task>,
}

pub struct SignedIn {
    pub worker: Worker,
    pub record: DailyRecord,
    pub streak: u32,
}

pub struct AdminDashboard {
    pub day: NaiveDate,
    pub stats: PeriodStats,
    pub signed_in: Vec<SignedIn>,
    pub absent: Vec<Worker>,
}

/// Days of history needed to compute streaks as of `day`: the lookback
/// window plus the day before the anchor.
fn streak_window(engine: &AttendanceEngine, day: NaiveDate) -> AppResult<DateRange> {
    last_n_days(day, engine.streak.max_lookback_days.saturating_add(1))
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn worker_view(
        pool: &DbPool,
        engine: &AttendanceEngine,
        worker_id: i64,
        day: NaiveDate,
    ) -> AppResult<WorkerDashboard> {
        let worker = get_worker(&pool.conn, worker_id)?;

        let history = load_events(&pool.conn, Some(&streak_window(engine, day)?), Some(worker_id))?;
        let records = engine.records(&history)?;

        let events: Vec<AttendanceEvent> = history
            .into_iter()
            .filter(|e| e.day() == Some(day))
            .collect();
        let record = records.iter().find(|r| r.day == day).cloned();
        let streak = engine.streak(&records, day);
        let tasks = load_tasks(&pool.conn, Some(worker_id))?;

        Ok(WorkerDashboard {
            worker,
            day,
            events,
            record,
            streak,
            tasks,
        })
    }

    pub fn admin_view(pool: &DbPool, engine: &AttendanceEngine, day: NaiveDate) -> AppResult<AdminDashboard> {
        let roster = load_workers(&pool.conn)?;

        let history = load_events(&pool.conn, Some(&streak_window(engine, day)?), None)?;
        let records = engine.records(&history)?;
        let streaks = engine.streaks(&records, day);

        let stats = engine.period_stats(&records, &roster, &PeriodFilter::new(DateRange::single(day)))?;

        let today: BTreeMap<i64, &DailyRecord> = records
            .iter()
            .filter(|r| r.day == day && r.attended)
            .map(|r| (r.worker_id, r))
            .collect();

        let mut signed_in = Vec::new();
        let mut absent = Vec::new();
        for w in roster {
            match today.get(&w.id) {
                Some(r) => signed_in.push(SignedIn {
                    streak: streaks.get(&w.id).copied().unwrap_or(0),
                    record: (*r).clone(),
                    worker: w,
                }),
                None => absent.push(w),
            }
        }
        signed_in.sort_by_key(|s| (s.record.first_check_in, s.worker.id));

        Ok(AdminDashboard {
            day,
            stats,
            signed_in,
            absent,
        })
    }

    pub fn print_worker(d: &WorkerDashboard) {
        header(format!("Dashboard of {} ({})", d.worker.name, d.day));

        println!(
            "{:<12} {}",
            "Role:",
            if d.worker.role.is_empty() { "-" } else { d.worker.role.as_str() }
        );
        println!(
            "{:<12} {}",
            "Status:",
            paint(color_for_worker_status(d.worker.status), d.worker.status.to_db_str())
        );

        match &d.record {
            Some(r) => {
                let today = if r.late {
                    paint(RED, "Late")
                } else {
                    paint(GREEN, "Present")
                };
                println!("{:<12} {}", "Today:", today);
                println!("{:<12} {}", "First in:", r.first_check_in.format("%H:%M"));
                println!("{:<12} {}", "Worked:", hours2readable(r.hours_worked, false));
            }
            None => println!("{:<12} {}", "Today:", paint(GREY, "Not signed in")),
        }
        println!("{:<12} {} day(s)", "Streak:", bold(&d.streak.to_string()));

        if !d.events.is_empty() {
            println!();
            Self::print_events(&d.events);
        }

        header("Tasks");
        TaskLogic::print(&d.tasks, d.day, false);
    }

    fn print_events(events: &[AttendanceEvent]) {
        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("IN"),
            Column::left("OUT"),
            Column::left("STATUS"),
            Column::right("HOURS"),
        ]);
        for e in events {
            table.add_row(vec![
                e.id.to_string(),
                e.check_in_str(),
                colorize_optional(&e.check_out_str()),
                paint(color_for_status(e.status), e.status.to_db_str()),
                format!("{:.2}", e.hours),
            ]);
        }
        print!("{}", table.render());
    }

    pub fn print_admin(d: &AdminDashboard) {
        let s = &d.stats;
        header(format!("Admin dashboard ({})", d.day));

        println!("{:<12} {}", "Workers:", s.total_workers_in_scope);
        println!("{:<12} {}", "Present:", s.present_count);
        println!("{:<12} {}", "Late:", s.late_count);
        println!("{:<12} {}", "Absent:", s.absent_count);
        println!(
            "{:<12} {}",
            "Attendance:",
            paint(
                color_for_percentage(s.attendance_percentage),
                &pct(s.attendance_percentage)
            )
        );

        header("Sign-ins by hour (cumulative)");
        let max = s.hourly.iter().map(|h| h.total()).max().unwrap_or(0) as f64;
        let mut hourly = Table::new(vec![
            Column::left("HOUR"),
            Column::right("ON TIME"),
            Column::right("LATE"),
            Column::left(""),
        ]);
        for h in &s.hourly {
            hourly.add_row(vec![
                h.label.clone(),
                h.on_time.to_string(),
                h.late.to_string(),
                bar(h.total() as f64, max, 20),
            ]);
        }
        print!("{}", hourly.render());

        header("Signed in");
        if d.signed_in.is_empty() {
            println!("{}", paint(GREY, "Nobody has signed in yet."));
        } else {
            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("NAME"),
                Column::left("ROLE"),
                Column::left("FIRST IN"),
                Column::left("STATUS"),
                Column::right("STREAK"),
            ]);
            for s in &d.signed_in {
                let status = if s.record.late {
                    paint(RED, "Late")
                } else {
                    "On time".to_string()
                };
                table.add_row(vec![
                    s.worker.id.to_string(),
                    s.worker.name.clone(),
                    s.worker.role.clone(),
                    s.record.first_check_in.format("%H:%M").to_string(),
                    status,
                    s.streak.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        header("Absent");
        if d.absent.is_empty() {
            println!("{}", paint(GREY, "Nobody."));
        } else {
            for w in &d.absent {
                println!("  {:>4}  {}", w.id, w.name);
            }
        }
    }
}
