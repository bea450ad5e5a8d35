use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, skip_invalid } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let summary = ImportLogic::import(&mut pool, &expand_tilde(file), *skip_invalid)?;

        for reason in &summary.skipped {
            warning(format!("Skipped: {reason}"));
        }
        success(format!(
            "Imported {} event(s), skipped {}",
            summary.imported,
            summary.skipped.len()
        ));
    }
    Ok(())
}
