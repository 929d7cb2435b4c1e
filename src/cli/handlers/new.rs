//! Handler for the `new` command
//!
//! Files a ticket from command-line flags or from interactive prompts that
//! offer the category, subcategory and unit choices of the reference data.

use super::base::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::cli::utils::parse_field_assignment;
use crate::core::{Ticket, TicketBuilder, fields};
use crate::error::Result;
use crate::reference::{CategoryCatalog, CategoryDefaults};
use crate::storage::TicketRepository;
use dialoguer::{Input, Select, theme::ColorfulTheme};

/// Priorities offered by the interactive prompt
pub const PRIORITIES: &[&str] = &["Low", "Normal", "High", "Urgent"];

/// Parameters for filing a ticket
#[derive(Debug, Default, Clone)]
pub struct NewParams {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub priority: Option<String>,
    /// Extra `key=value` assignments
    pub fields: Vec<String>,
    pub interactive: bool,
}

/// Handle the `new` command
pub fn handle_new_command(
    params: NewParams,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let catalog = ctx.catalog();
    if catalog.is_fallback() {
        tracing::debug!("Filing against built-in categories");
    }

    let params = if params.interactive {
        prompt_for_missing(params, &catalog, &ctx.units())?
    } else {
        params
    };

    warn_on_unknown_choices(&params, &catalog, &ctx.units(), formatter);

    let submission = build_submission(&params, &catalog.defaults(), &ctx.config.default_priority)?;
    let ticket = ctx.store.submit(submission)?;

    if formatter.is_json() {
        formatter.print_json(&ticket)?;
    } else {
        formatter.success(&format!(
            "Created ticket {} ({})",
            ticket.id().unwrap_or_default(),
            summary(&ticket)
        ));
    }
    Ok(())
}

/// Build the submission in form order
///
/// The priority falls back to the category's default, then to
/// `fallback_priority`. Extra `key=value` fields are applied last and may
/// replace any earlier field, including generated ones.
pub fn build_submission(
    params: &NewParams,
    defaults: &CategoryDefaults,
    fallback_priority: &str,
) -> Result<TicketBuilder> {
    let priority = params.priority.clone().unwrap_or_else(|| {
        params.category.as_deref().map_or_else(
            || fallback_priority.to_string(),
            |category| match defaults.get(category) {
                Some(default) => default.priority.clone(),
                None => fallback_priority.to_string(),
            },
        )
    });

    let mut builder = TicketBuilder::new();
    let form = [
        (fields::CATEGORY, params.category.as_ref()),
        (fields::SUBCATEGORY, params.subcategory.as_ref()),
        (fields::UNIT_CODE, params.unit.as_ref()),
        (fields::PRIORITY, Some(&priority)),
        (fields::DESCRIPTION, params.description.as_ref()),
        (fields::CONTACT_NAME, params.contact_name.as_ref()),
        (fields::CONTACT_PHONE, params.contact_phone.as_ref()),
    ];
    for (name, value) in form {
        if let Some(value) = value {
            builder = builder.field(name, value.clone());
        }
    }

    for assignment in &params.fields {
        let (name, value) = parse_field_assignment(assignment)?;
        builder = builder.field(name, value);
    }
    Ok(builder)
}

fn warn_on_unknown_choices(
    params: &NewParams,
    catalog: &CategoryCatalog,
    units: &[String],
    formatter: &OutputFormatter,
) {
    if let Some(category) = &params.category {
        if !catalog.contains(category) {
            formatter.warning(&format!("'{category}' is not a known category"));
        }
    }
    if let Some(unit) = &params.unit {
        if !units.is_empty() && !units.contains(unit) {
            formatter.warning(&format!("'{unit}' is not a known unit"));
        }
    }
}

/// Fill unset fields from prompts
fn prompt_for_missing(
    mut params: NewParams,
    catalog: &CategoryCatalog,
    units: &[String],
) -> Result<NewParams> {
    let theme = ColorfulTheme::default();

    if params.category.is_none() {
        let categories = catalog.categories();
        let labels: Vec<String> = categories
            .iter()
            .map(|c| format!("{} ({})", c.name, c.scope))
            .collect();
        let index = Select::with_theme(&theme)
            .with_prompt("Category")
            .items(&labels)
            .default(0)
            .interact()?;
        params.category = Some(categories[index].name.clone());
    }

    if params.subcategory.is_none() {
        let category = params.category.as_deref().unwrap_or_default();
        let subcategories = catalog.subcategories(category);
        if !subcategories.is_empty() {
            let index = Select::with_theme(&theme)
                .with_prompt("Subcategory")
                .items(&subcategories)
                .default(0)
                .interact()?;
            params.subcategory = Some(subcategories[index].clone());
        }
    }

    if params.unit.is_none() {
        let prompt = if units.is_empty() {
            "Unit code".to_string()
        } else {
            format!("Unit code (e.g. {})", units.iter().take(3).cloned().collect::<Vec<_>>().join(", "))
        };
        params.unit = Some(Input::<String>::with_theme(&theme).with_prompt(prompt).interact_text()?);
    }

    if params.priority.is_none() {
        let category = params.category.as_deref().unwrap_or_default();
        let suggested = catalog.defaults().priority_for(category).to_string();
        let default_index = PRIORITIES.iter().position(|p| *p == suggested).unwrap_or(1);
        let index = Select::with_theme(&theme)
            .with_prompt("Priority")
            .items(PRIORITIES)
            .default(default_index)
            .interact()?;
        params.priority = Some(PRIORITIES[index].to_string());
    }

    if params.description.is_none() {
        params.description = Some(
            Input::<String>::with_theme(&theme)
                .with_prompt("Description")
                .allow_empty(true)
                .interact_text()?,
        );
    }
    if params.contact_name.is_none() {
        params.contact_name = Some(
            Input::<String>::with_theme(&theme)
                .with_prompt("Contact name")
                .allow_empty(true)
                .interact_text()?,
        );
    }
    if params.contact_phone.is_none() {
        params.contact_phone = Some(
            Input::<String>::with_theme(&theme)
                .with_prompt("Contact phone")
                .allow_empty(true)
                .interact_text()?,
        );
    }

    Ok(params)
}

/// `category — unit` line used in notices and listings
pub fn summary(ticket: &Ticket) -> String {
    format!(
        "{} — {}",
        ticket.get_or_empty(fields::CATEGORY),
        ticket.get_or_empty(fields::UNIT_CODE)
    )
}
