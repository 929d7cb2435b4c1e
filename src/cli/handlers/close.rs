//! Handlers for the `close` and `clear` commands

use super::base::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::core::fields;
use crate::error::{DeskError, Result};
use crate::storage::TicketRepository;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Handle the `close` command
///
/// An unknown ID is reported as an error and leaves the store untouched.
pub fn handle_close_command(
    ticket_ref: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let not_found = || DeskError::TicketNotFound {
        id: ticket_ref.to_string(),
    };

    let id = ctx.resolve_ticket_id(ticket_ref).ok_or_else(not_found)?;
    let ticket = ctx.store.close(&id)?.ok_or_else(not_found)?;

    if formatter.is_json() {
        formatter.print_json(&ticket)?;
    } else {
        formatter.success(&format!(
            "Closed ticket {} at {}",
            id,
            ticket.get_or_empty(fields::CLOSED_AT)
        ));
    }
    Ok(())
}

/// Handle the `clear` command
///
/// Asks for confirmation unless `yes` is set. There is no undo.
pub fn handle_clear_command(
    yes: bool,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let count = ctx.store.load_all().len();

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Clear all tickets stored locally?")
            .default(false)
            .interact()?;
    if !confirmed {
        return Err(DeskError::Cancelled);
    }

    ctx.store.clear()?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "cleared": count,
        }))?;
    } else {
        formatter.success(&format!("Cleared {count} ticket(s)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;
    use crate::test_utils::TestProject;

    #[test]
    fn test_close_command() {
        let project = TestProject::new();
        let ticket = project.create_ticket("Electrical", "B204");
        let id = ticket.id().unwrap();

        handle_close_command(id, Some(project.root_path_str()), &OutputFormatter::default())
            .unwrap();

        let stored = project.store.get(id).unwrap();
        assert_eq!(stored.status(), Some(Status::Closed));
        assert!(stored.contains(fields::CLOSED_AT));
    }

    #[test]
    fn test_close_unknown_ticket() {
        let project = TestProject::with_sample_tickets();
        let before = project.store.load_all();

        let err = handle_close_command(
            "R-000000",
            Some(project.root_path_str()),
            &OutputFormatter::default(),
        )
        .unwrap_err();

        assert!(matches!(err, DeskError::TicketNotFound { .. }));
        assert_eq!(project.store.load_all(), before);
    }

    #[test]
    fn test_clear_command_with_yes() {
        let project = TestProject::with_sample_tickets();
        handle_clear_command(true, Some(project.root_path_str()), &OutputFormatter::default())
            .unwrap();
        assert!(project.store.list().is_empty());
    }
}
