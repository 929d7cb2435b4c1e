//! Handlers for the `categories` and `units` commands

use super::base::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::error::{DeskError, Result};

/// Handle the `categories` command
///
/// Without a category, prints every category grouped by scope along with its
/// default priority and assignee. With one, prints its subcategories.
pub fn handle_categories_command(
    category: Option<&str>,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let catalog = ctx.catalog();
    if catalog.is_fallback() {
        formatter.warning(&format!(
            "{} not usable, showing built-in categories",
            ctx.categories_path().display()
        ));
    }

    if let Some(category) = category {
        if !catalog.contains(category) {
            return Err(DeskError::InvalidInput(format!(
                "Unknown category '{category}'"
            )));
        }
        let subcategories = catalog.subcategories(category);
        if formatter.is_json() {
            return formatter.print_json(&subcategories);
        }
        if subcategories.is_empty() {
            formatter.info(&format!("{category} has no subcategories"));
        }
        for subcategory in &subcategories {
            formatter.info(subcategory);
        }
        return Ok(());
    }

    let categories = catalog.categories();
    if formatter.is_json() {
        return formatter.print_json(&categories);
    }

    let defaults = catalog.defaults();
    let mut current_scope: Option<&str> = None;
    for info in &categories {
        if current_scope != Some(info.scope.as_str()) {
            formatter.info(&format!("{}:", info.scope));
            current_scope = Some(info.scope.as_str());
        }
        let default = defaults.get(&info.name);
        formatter.info(&format!(
            "  {:<14} priority {:<8} assignee {}",
            info.name,
            defaults.priority_for(&info.name),
            default.map_or("", |d| d.assignee.as_str())
        ));
    }
    Ok(())
}

/// Handle the `units` command
pub fn handle_units_command(project_dir: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let units = ctx.units();

    if formatter.is_json() {
        return formatter.print_json(&units);
    }
    if units.is_empty() {
        formatter.info(&format!("No units listed in {}", ctx.units_path().display()));
        return Ok(());
    }
    for unit in &units {
        formatter.info(unit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestProject;

    #[test]
    fn test_categories_command() {
        let project = TestProject::new();
        let formatter = OutputFormatter::default();
        handle_categories_command(None, Some(project.root_path_str()), &formatter).unwrap();
        handle_categories_command(Some("Plumbing"), Some(project.root_path_str()), &formatter)
            .unwrap();
        assert!(
            handle_categories_command(Some("Roofing"), Some(project.root_path_str()), &formatter)
                .is_err()
        );
    }

    #[test]
    fn test_units_command() {
        let project = TestProject::new();
        project.write_data_file("units_R.csv", "unit_code\nA101\nA102\n");
        handle_units_command(Some(project.root_path_str()), &OutputFormatter::default()).unwrap();
    }
}
