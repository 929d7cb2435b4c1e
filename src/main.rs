//! maintenance-desk - maintenance ticket intake desk
//!
//! This is the main entry point for the maintenance-desk CLI application.
//! It handles command-line argument parsing and dispatches to the appropriate
//! command handlers.

use clap::Parser;
use maintenance_desk::cli::handlers::{
    NewParams, handle_categories_command, handle_clear_command, handle_close_command,
    handle_config_command, handle_export_command, handle_init, handle_list_command,
    handle_new_command, handle_show_command, handle_units_command,
};
use maintenance_desk::cli::{Cli, Commands, OutputFormatter};
use maintenance_desk::error::{DeskError, Result};
use std::process;

/// Main entry point for the maintenance-desk CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    }

    dispatch_command(cli.command, cli.project.as_deref(), formatter)
}

fn dispatch_command(
    command: Commands,
    project: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Init { force } => handle_init(force, project, formatter),
        Commands::New {
            category,
            subcategory,
            unit,
            description,
            contact_name,
            contact_phone,
            priority,
            fields,
            interactive,
        } => handle_new_command(
            NewParams {
                category,
                subcategory,
                unit,
                description,
                contact_name,
                contact_phone,
                priority,
                fields,
                interactive,
            },
            project,
            formatter,
        ),
        Commands::List { status, limit } => {
            handle_list_command(status.as_deref(), limit, project, formatter)
        },
        Commands::Show { ticket } => handle_show_command(&ticket, project, formatter),
        Commands::Close { ticket } => handle_close_command(&ticket, project, formatter),
        Commands::Clear { yes } => handle_clear_command(yes, project, formatter),
        Commands::Export { output, format } => {
            handle_export_command(output.as_deref(), &format, project, formatter)
        },
        Commands::Categories { category } => {
            handle_categories_command(category.as_deref(), project, formatter)
        },
        Commands::Units => handle_units_command(project, formatter),
        Commands::Config { command } => handle_config_command(command, project, formatter),
    }
}

/// Handle errors and display them to the user
///
/// Prints the message and any suggestions; in JSON mode the error is also
/// emitted as a JSON object on stdout.
fn handle_error(error: &DeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() && !formatter.is_json() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "error_type": format!("{error:?}"),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let _cli = Cli::parse_from(["maintenance-desk", "init"]);
        let _cli = Cli::parse_from(["maintenance-desk", "list", "--status", "open"]);
        let _cli = Cli::parse_from([
            "maintenance-desk",
            "new",
            "--category",
            "Plumbing",
            "--unit",
            "A101",
            "-f",
            "floor=1",
        ]);
    }

    #[test]
    fn test_new_collects_repeated_fields() {
        let cli = Cli::parse_from(["maintenance-desk", "new", "-f", "a=1", "--field", "b=2"]);
        match cli.command {
            Commands::New { fields, .. } => assert_eq!(fields, vec!["a=1", "b=2"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
