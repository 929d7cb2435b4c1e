//! Handlers for the `list` and `show` commands

use super::base::HandlerContext;
use super::new::summary;
use crate::cli::output::OutputFormatter;
use crate::cli::utils::format_timestamp;
use crate::core::{Status, Ticket, fields};
use crate::error::Result;
use crate::storage::TicketRepository;

/// Filtering applied to the ticket queue
#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub limit: Option<usize>,
}

impl TicketFilter {
    /// Build a filter from command-line values
    pub fn from_args(status: Option<&str>, limit: Option<usize>) -> Result<Self> {
        Ok(Self {
            status: status.map(str::parse::<Status>).transpose()?,
            limit,
        })
    }

    /// Apply the filter to tickets already in display order
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        let filtered = tickets
            .into_iter()
            .filter(|ticket| self.status.is_none_or(|status| ticket.status() == Some(status)));
        match self.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }
}

/// Handle the `list` command
pub fn handle_list_command(
    status: Option<&str>,
    limit: Option<usize>,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let filter = TicketFilter::from_args(status, limit)?;
    let tickets = filter.apply(ctx.store.list());

    if formatter.is_json() {
        return formatter.print_json(&tickets);
    }

    if tickets.is_empty() {
        formatter.info("No tickets yet.");
        return Ok(());
    }

    for ticket in &tickets {
        render_ticket(ticket, formatter);
    }
    Ok(())
}

/// Print one queue entry
fn render_ticket(ticket: &Ticket, formatter: &OutputFormatter) {
    formatter.info(&format!(
        "[{}] {}  ({})",
        ticket.get_or_empty(fields::ID),
        summary(ticket),
        ticket.get_or_empty(fields::STATUS)
    ));
    let description = ticket.get_or_empty(fields::DESCRIPTION);
    if !description.is_empty() {
        formatter.detail(description);
    }
    formatter.detail(&contact_line(ticket));
    formatter.detail(&format!(
        "Priority: {}  Created: {}",
        ticket.get_or_empty(fields::PRIORITY),
        format_timestamp(ticket.created_at())
    ));
}

/// `Contact: name (phone)`, omitting the parentheses without a phone
pub fn contact_line(ticket: &Ticket) -> String {
    let phone = ticket.get_or_empty(fields::CONTACT_PHONE);
    let phone = if phone.is_empty() {
        String::new()
    } else {
        format!("({phone})")
    };
    format!(
        "Contact: {} {}",
        ticket.get_or_empty(fields::CONTACT_NAME),
        phone
    )
    .trim_end()
    .to_string()
}

/// Handle the `show` command
pub fn handle_show_command(
    ticket_ref: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let ticket = ctx.find_ticket(ticket_ref)?;

    if formatter.is_json() {
        return formatter.print_json(&ticket);
    }

    let width = ticket.keys().map(str::len).max().unwrap_or(0);
    for (name, value) in ticket.iter() {
        let value = match name {
            fields::CREATED_AT | fields::UPDATED_AT | fields::CLOSED_AT => format_timestamp(value),
            _ => value.to_string(),
        };
        formatter.info(&format!("{name:<width$}  {value}"));
    }
    Ok(())
}
