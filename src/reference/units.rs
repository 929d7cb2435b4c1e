use crate::codec;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Unit codes offered when filing a ticket
///
/// Reads the `unit_code` column; blank and repeated codes are dropped while
/// file order is kept. A missing or unreadable file yields no units.
pub fn load_units(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => parse_units(&text),
        Err(e) => {
            tracing::warn!("Could not read units from {}: {}", path.display(), e);
            Vec::new()
        },
    }
}

/// Unit codes from unit CSV text
pub fn parse_units(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    codec::parse::<HashMap<String, String>>(text)
        .into_iter()
        .filter_map(|mut row| row.remove("unit_code"))
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty() && seen.insert(code.clone()))
        .collect()
}
