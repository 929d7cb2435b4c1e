//! Handler for the `init` command

use super::base::{DATA_DIR_NAME, STORE_DIR_NAME};
use crate::cli::output::OutputFormatter;
use crate::cli::utils::DESK_DIR_NAME;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{DeskError, Result};
use crate::reference::{UNIT_HEADER, default_categories_csv};
use std::fs;
use std::path::{Path, PathBuf};

/// Handler for the `init` command
///
/// Creates `.maintenance-desk/` with a default `config.yaml`, an empty
/// store directory, and starter reference files. With `force`, the
/// configuration and reference files of an existing desk are rewritten;
/// stored tickets are never touched.
pub fn handle_init(
    force: bool,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let root = match project_dir {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };
    let desk_dir = init_desk(&root, force)?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "desk_dir": desk_dir,
        }))?;
    } else {
        formatter.success(&format!("Initialized desk in {}", desk_dir.display()));
        formatter.info("Edit data/ticket_categories.csv and data/units_R.csv to match your building.");
    }
    Ok(())
}

/// Create the desk layout under `root`, returning the desk directory
pub fn init_desk(root: &Path, force: bool) -> Result<PathBuf> {
    let desk_dir = root.join(DESK_DIR_NAME);
    if desk_dir.exists() && !force {
        return Err(DeskError::ProjectAlreadyInitialized {
            path: desk_dir.display().to_string(),
        });
    }

    let data_dir = desk_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&data_dir)?;
    fs::create_dir_all(desk_dir.join(STORE_DIR_NAME))?;

    let config = Config::default();
    config.save(&desk_dir.join(CONFIG_FILE_NAME))?;
    fs::write(data_dir.join(&config.categories_file), default_categories_csv())?;
    fs::write(data_dir.join(&config.units_file), format!("{UNIT_HEADER}\n"))?;

    tracing::info!("Initialized desk at {}", desk_dir.display());
    Ok(desk_dir)
}
