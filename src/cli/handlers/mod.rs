//! Command handlers
//!
//! Each handler resolves the desk from the optional project directory,
//! performs its operation and reports through the [`OutputFormatter`].
//!
//! [`OutputFormatter`]: crate::cli::OutputFormatter

pub mod base;
mod close;
mod config;
mod export;
mod init;
mod list;
mod new;
mod reference;

pub use close::{handle_clear_command, handle_close_command};
pub use config::handle_config_command;
pub use export::{DataFormat, export_tickets, handle_export_command};
pub use init::{handle_init, init_desk};
pub use list::{TicketFilter, handle_list_command, handle_show_command};
pub use new::{NewParams, PRIORITIES, build_submission, handle_new_command};
pub use reference::{handle_categories_command, handle_units_command};
