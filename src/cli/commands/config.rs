use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                ConfigLogic::print(&path)?;
            } else {
                info("No configuration file, using defaults:\n");
                println!("{}", cfg.to_yaml()?);
            }
        }

        if *check {
            if path.exists() {
                ConfigLogic::check(&path)?;
            } else {
                warning(format!(
                    "{} does not exist (run `rattendance init`)",
                    path.display()
                ));
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
