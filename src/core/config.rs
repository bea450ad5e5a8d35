use crate::config::Config;
use crate::core::logic::AttendanceEngine;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        println!("{}", content);
        Ok(())
    }

    /// Report keys missing from the file and settings the engine rejects.
    pub fn check(path: &Path) -> AppResult<()> {
        let missing = Config::missing_keys(path)?;
        for key in &missing {
            warning(format!("'{key}' is missing, the default value is used"));
        }

        let cfg = Config::load_from(path)?;
        AttendanceEngine::from_config(&cfg)?;

        if missing.is_empty() {
            success(format!("{} is complete and valid", path.display()));
        } else {
            success(format!("{} is valid", path.display()));
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| "nano".into());

        Command::new(ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_conf(name: &str, body: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{name}_rattendance.conf"));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn check_rejects_oversized_streak_window() {
        let path = write_conf(
            "check_streak_window",
            "database: /tmp/x.sqlite\nstreak_max_days: 4000000000\n",
        );
        let err = ConfigLogic::check(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("streak_max_days")));
    }

    #[test]
    fn check_accepts_defaults() {
        let path = write_conf("check_defaults", "database: /tmp/x.sqlite\n");
        assert!(ConfigLogic::check(&path).is_ok());
    }
}
