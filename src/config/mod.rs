use crate::core::calculator::{StatusMode, StreakAnchor};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::home_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub organization: String,
    /// Allowed worker roles; empty means any role is accepted.
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default = "default_late_cutoff")]
    pub late_cutoff: String,
    #[serde(default)]
    pub status_mode: StatusMode,
    #[serde(default)]
    pub streak_anchor: StreakAnchor,
    #[serde(default = "default_streak_max_days")]
    pub streak_max_days: u32,
    #[serde(default = "default_hourly_buckets")]
    pub hourly_buckets: Vec<u32>,
    #[serde(default = "default_report_days")]
    pub report_default_days: u32,
}

fn default_late_cutoff() -> String {
    "09:00".to_string()
}
fn default_streak_max_days() -> u32 {
    30
}
fn default_hourly_buckets() -> Vec<u32> {
    vec![8, 9, 10, 11]
}
fn default_report_days() -> u32 {
    30
}

/// Keys written by `init`; `config --check` reports the ones a file lacks.
const KNOWN_KEYS: [&str; 9] = [
    "database",
    "organization",
    "departments",
    "late_cutoff",
    "status_mode",
    "streak_anchor",
    "streak_max_days",
    "hourly_buckets",
    "report_default_days",
];

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            organization: String::new(),
            departments: Vec::new(),
            late_cutoff: default_late_cutoff(),
            status_mode: StatusMode::default(),
            streak_anchor: StreakAnchor::default(),
            streak_max_days: default_streak_max_days(),
            hourly_buckets: default_hourly_buckets(),
            report_default_days: default_report_days(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows")
            && let Ok(appdata) = env::var("APPDATA")
        {
            return PathBuf::from(appdata).join("rattendance");
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Keys missing from the YAML file at `path` (defaults apply to them).
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path)?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = yaml.as_mapping() else {
            return Err(AppError::Config(format!(
                "{} is not a YAML mapping",
                path.display()
            )));
        };

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write config file
        if !is_test {
            let config = Self::with_database(db_path.clone());
            fs::write(Self::config_file(), config.to_yaml()?)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(db_path)
    }
}
