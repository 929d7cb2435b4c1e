//! Configuration for maintenance-desk
//!
//! Settings are layered, later sources overriding earlier ones:
//! built-in defaults, the user config file, the project's
//! `.maintenance-desk/config.yaml`, then `MDESK_*` environment variables.

use crate::error::{DeskError, Result};
use crate::storage::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the project configuration inside the desk directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const ENV_PREFIX: &str = "MDESK";

/// Keys accepted by `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "storage_key",
    "categories_file",
    "units_file",
    "export_file",
    "default_priority",
];

/// Desk configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blob key holding the ticket collection
    pub storage_key: String,
    /// Category reference file, relative to the data directory
    pub categories_file: String,
    /// Unit reference file, relative to the data directory
    pub units_file: String,
    /// Default export file name
    pub export_file: String,
    /// Priority used when neither the user nor the category supplies one
    pub default_priority: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            categories_file: "ticket_categories.csv".to_string(),
            units_file: "units_R.csv".to_string(),
            export_file: "tickets_export.csv".to_string(),
            default_priority: crate::reference::FALLBACK_PRIORITY.to_string(),
        }
    }
}

impl Config {
    /// Path of the per-user config file, if a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "maintenance-desk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration for a desk directory
    pub fn load(desk_dir: &Path) -> Result<Self> {
        Self::load_layers(Some(&desk_dir.join(CONFIG_FILE_NAME)))
    }

    /// Load configuration without a project file
    pub fn load_or_default() -> Result<Self> {
        Self::load_layers(None)
    }

    fn load_layers(project_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("storage_key", defaults.storage_key)?
            .set_default("categories_file", defaults.categories_file)?
            .set_default("units_file", defaults.units_file)?
            .set_default("export_file", defaults.export_file)?
            .set_default("default_priority", defaults.default_priority)?;

        if let Some(user_file) = Self::user_config_path() {
            builder = builder.add_source(config::File::from(user_file).required(false));
        }
        if let Some(project_file) = project_file {
            tracing::debug!("Loading configuration from {}", project_file.display());
            builder = builder.add_source(config::File::from(project_file).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break storage or reference loading
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(DeskError::Config("storage_key cannot be empty".to_string()));
        }
        if self.storage_key.contains(['/', '\\']) {
            return Err(DeskError::Config(format!(
                "storage_key '{}' must not contain path separators",
                self.storage_key
            )));
        }
        if self.export_file.trim().is_empty() {
            return Err(DeskError::Config("export_file cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Write the configuration as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| DeskError::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Set one key by name
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "storage_key" => &mut self.storage_key,
            "categories_file" => &mut self.categories_file,
            "units_file" => &mut self.units_file,
            "export_file" => &mut self.export_file,
            "default_priority" => &mut self.default_priority,
            _ => {
                return Err(DeskError::InvalidInput(format!(
                    "Unknown config key '{key}'. Known keys: {}",
                    CONFIG_KEYS.join(", ")
                )));
            },
        };
        *slot = value.to_string();
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage_key, "mdl_r_tickets_v1");
        assert_eq!(config.export_file, "tickets_export.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "units_file: units_tower_b.csv\n",
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.units_file, "units_tower_b.csv");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("default_priority", "High").unwrap();
        config.save(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.default_priority, "High");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("storage_key", "../tickets").is_err());
    }

    #[test]
    fn test_broken_project_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "storage_key: [oops").unwrap();
        let err = Config::load(temp_dir.path()).unwrap_err();
        assert!(err.is_config_error());
    }
}
