use crate::error::{DeskError, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Name of the per-project desk directory
pub const DESK_DIR_NAME: &str = ".maintenance-desk";

/// Find the project root by walking up from `start` (or the working directory)
/// until a directory containing `.maintenance-desk` is found
pub fn find_project_root(start: Option<&str>) -> Result<PathBuf> {
    let start = match start {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    start
        .ancestors()
        .find(|dir| dir.join(DESK_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
        .ok_or(DeskError::ProjectNotInitialized)
}

/// Parse a `key=value` field assignment
pub fn parse_field_assignment(input: &str) -> Result<(String, String)> {
    let (key, value) = input.split_once('=').ok_or_else(|| {
        DeskError::InvalidInput(format!("Field '{input}' must look like key=value"))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(DeskError::InvalidInput(format!(
            "Field '{input}' has an empty name"
        )));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Render an ISO-8601 timestamp in local time, or return it unchanged
pub fn format_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}
