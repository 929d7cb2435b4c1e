//! Handler for the `config` command

use crate::cli::output::OutputFormatter;
use crate::cli::utils::{DESK_DIR_NAME, find_project_root};
use crate::cli::ConfigCommands;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{DeskError, Result};

/// Handle `config show` and `config set`
pub fn handle_config_command(
    command: ConfigCommands,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let desk_dir = find_project_root(project_dir)?.join(DESK_DIR_NAME);

    match command {
        ConfigCommands::Show => {
            let config = Config::load(&desk_dir)?;
            if formatter.is_json() {
                formatter.print_json(&config)?;
            } else {
                let yaml = serde_yaml::to_string(&config)
                    .map_err(|e| DeskError::SerializationError(e.to_string()))?;
                formatter.info(yaml.trim_end());
            }
        },
        ConfigCommands::Set { key, value } => {
            // Only the project file is rewritten; user and env layers stay as they are
            let path = desk_dir.join(CONFIG_FILE_NAME);
            let mut config = if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                serde_yaml::from_str(&content)
                    .map_err(|e| DeskError::Config(format!("Failed to parse {}: {e}", path.display())))?
            } else {
                Config::default()
            };
            config.set(&key, &value)?;
            config.save(&path)?;
            formatter.success(&format!("Set {key} = {value}"));
        },
    }
    Ok(())
}
