//! Implementation of `trellis config`.

use serde::Serialize;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct PathReport {
    path: String,
    exists: bool,
}

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                return output.json(config);
            }
            let text = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            })?;
            output.block(&text)?;
        }
        ConfigCommands::Path => {
            let path = AppConfig::config_path();
            if output.is_json() {
                return output.json(&PathReport {
                    path: path.display().to_string(),
                    exists: path.exists(),
                });
            }
            // Printed even when quiet; scripts capture it.
            println!("{}", path.display());
        }
    }
    Ok(())
}
