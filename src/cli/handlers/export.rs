//! Handler for the `export` command and the export formats

use super::base::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::codec;
use crate::core::Ticket;
use crate::error::{DeskError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
    Yaml,
}

impl DataFormat {
    /// Get file extension for the format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Export tickets in this format
    pub fn export(&self, tickets: &[Ticket]) -> Result<String> {
        match self {
            Self::Csv => codec::serialize(tickets),
            Self::Json => serde_json::to_string_pretty(tickets).map_err(|e| {
                DeskError::SerializationError(format!("Failed to serialize to JSON: {e}"))
            }),
            Self::Yaml => serde_yaml::to_string(tickets).map_err(|e| {
                DeskError::SerializationError(format!("Failed to serialize to YAML: {e}"))
            }),
        }
    }
}

impl FromStr for DataFormat {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(DeskError::InvalidInput(format!(
                "Unsupported export format '{other}'. Use csv, json or yaml"
            ))),
        }
    }
}

/// Render tickets for export
///
/// Tickets keep their stored order. An empty collection is refused so no
/// empty export file is ever produced.
pub fn export_tickets(tickets: &[Ticket], format: DataFormat) -> Result<String> {
    if tickets.is_empty() {
        return Err(DeskError::NoTicketsToExport);
    }
    format.export(tickets)
}

/// Default output path: the configured file, with the extension swapped
/// for non-CSV formats
fn default_output(export_file: &str, format: DataFormat) -> PathBuf {
    let path = PathBuf::from(export_file);
    if format == DataFormat::Csv {
        path
    } else {
        path.with_extension(format.extension())
    }
}

/// Handle the `export` command
pub fn handle_export_command(
    output: Option<&str>,
    format: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let format: DataFormat = format.parse()?;
    let ctx = HandlerContext::new(project_dir)?;
    let tickets = ctx.store.load_all();
    let content = export_tickets(&tickets, format)?;

    if output == Some("-") {
        println!("{content}");
        return Ok(());
    }

    // The configured export file lives next to the desk; an explicit --output is used as given
    let path = output.map_or_else(
        || ctx.project_root.join(default_output(&ctx.config.export_file, format)),
        PathBuf::from,
    );
    write_export(&path, &content)?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "path": path,
            "tickets": tickets.len(),
            "format": format.extension(),
        }))?;
    } else {
        formatter.success(&format!(
            "Exported {} ticket(s) to {}",
            tickets.len(),
            path.display()
        ));
    }
    Ok(())
}

fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::debug!("Wrote export to {}", path.display());
    Ok(())
}
