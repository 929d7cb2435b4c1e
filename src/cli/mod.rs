//! Command-line interface for maintenance-desk

mod commands;
pub mod handlers;
pub mod output;
pub mod utils;

pub use commands::{Cli, Commands, ConfigCommands};
pub use output::OutputFormatter;
pub use utils::{DESK_DIR_NAME, find_project_root};
