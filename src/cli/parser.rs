use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Workforce attendance tracking: sign-ins, streaks and period reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print debug diagnostics on stderr
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing or invalid fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, value_name = "N", help = "Only the N most recent rows")]
        limit: Option<usize>,
    },

    /// Manage the worker roster
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Assign and track worker tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Sign a worker in (opens an attendance event)
    Signin {
        worker_id: i64,

        #[arg(long, value_name = "YYYY-MM-DD HH:MM", help = "Sign-in time (default: now)")]
        at: Option<String>,
    },

    /// Sign a worker out (closes the open attendance event)
    Signout {
        worker_id: i64,

        #[arg(long, value_name = "YYYY-MM-DD HH:MM", help = "Sign-out time (default: now)")]
        at: Option<String>,
    },

    /// List attendance events
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Filter by worker name (case-insensitive substring)")]
        name: Option<String>,

        #[arg(long, help = "Filter by role / department")]
        role: Option<String>,

        #[arg(long = "today", conflicts_with = "period", help = "Show only today's events")]
        today: bool,
    },

    /// Worker or admin dashboard for a day
    Dashboard {
        #[arg(long, value_name = "ID", help = "Show the dashboard of one worker")]
        worker: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Day to show (default: today)")]
        date: Option<String>,
    },

    /// Period report: attendance, lateness, trend and hours by department
    Report {
        #[arg(long, value_name = "RANGE", help = "Year/month/day or a custom range")]
        range: Option<String>,

        #[arg(long = "dept", help = "Restrict to one department")]
        department: Option<String>,

        #[arg(long, help = "Restrict to workers whose name contains this text")]
        name: Option<String>,

        #[arg(
            long,
            value_name = "YYYY-MM-DD",
            conflicts_with = "range",
            help = "Last day of the default window (default: today)"
        )]
        until: Option<String>,

        #[arg(long, help = "Print the statistics as JSON")]
        json: bool,
    },

    /// Bulk-load attendance events from a JSON file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "skip-invalid", help = "Skip malformed events instead of aborting")]
        skip_invalid: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export attendance data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'r', help = "Export normalized daily records instead of events")]
        records: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Add a worker (status: Invited)
    Add {
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        role: String,
    },

    /// Edit a worker
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long, help = "Online, Offline, Away or Invited")]
        status: Option<String>,
    },

    /// Delete a worker and their attendance history
    Del { id: i64 },

    /// List workers
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,
    },

    /// Set the presence status of a worker
    Status {
        id: i64,

        #[arg(help = "Online, Offline, Away or Invited")]
        status: String,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Assign a task to a worker
    Add {
        worker_id: i64,

        name: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        deadline: String,

        #[arg(long, default_value = "not-started", help = "not-started, in-progress or completed")]
        status: String,

        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,
    },

    /// List tasks by deadline
    List {
        #[arg(long, value_name = "ID", help = "Only the tasks of this worker")]
        worker: Option<i64>,
    },

    /// Change a task's name, deadline, status or progress
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        deadline: Option<String>,

        #[arg(long, help = "not-started, in-progress or completed")]
        status: Option<String>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
    },

    /// Delete a task
    Del { id: i64 },
}
