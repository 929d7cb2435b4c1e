//! Base handler utilities for common operations
//!
//! Every command except `init` starts by locating the desk, loading its
//! configuration and opening the ticket store; [`HandlerContext`] does that
//! once.

use crate::cli::utils::{DESK_DIR_NAME, find_project_root};
use crate::config::Config;
use crate::core::{Ticket, TicketId};
use crate::error::{DeskError, Result};
use crate::reference::{CategoryCatalog, load_units};
use crate::storage::{FileBlobStorage, TicketRepository, TicketStore};
use std::path::PathBuf;

/// Directory, inside the desk directory, holding the persisted blob
pub const STORE_DIR_NAME: &str = "store";

/// Directory, inside the desk directory, holding reference CSV files
pub const DATA_DIR_NAME: &str = "data";

/// Context for handler operations
pub struct HandlerContext {
    pub project_root: PathBuf,
    pub desk_dir: PathBuf,
    pub config: Config,
    pub store: TicketStore<FileBlobStorage>,
}

impl HandlerContext {
    /// Locate the desk, load its configuration and open its store
    pub fn new(project_dir: Option<&str>) -> Result<Self> {
        let project_root = find_project_root(project_dir)?;
        let desk_dir = project_root.join(DESK_DIR_NAME);
        let config = Config::load(&desk_dir)?;
        let storage = FileBlobStorage::new(desk_dir.join(STORE_DIR_NAME));
        let store = TicketStore::new(storage, config.storage_key.clone());

        tracing::debug!(
            "Using desk at {} (key '{}')",
            desk_dir.display(),
            config.storage_key
        );

        Ok(Self {
            project_root,
            desk_dir,
            config,
            store,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.desk_dir.join(DATA_DIR_NAME)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.data_dir().join(&self.config.categories_file)
    }

    pub fn units_path(&self) -> PathBuf {
        self.data_dir().join(&self.config.units_file)
    }

    /// Category catalog, falling back to built-in categories
    pub fn catalog(&self) -> CategoryCatalog {
        CategoryCatalog::load(&self.categories_path())
    }

    /// Unit codes, empty when the units file is missing
    pub fn units(&self) -> Vec<String> {
        load_units(&self.units_path())
    }

    /// Find a ticket by ID, accepting lowercase input
    pub fn find_ticket(&self, ticket_ref: &str) -> Result<Ticket> {
        self.resolve_ticket_id(ticket_ref)
            .and_then(|id| self.store.get(&id))
            .ok_or_else(|| DeskError::TicketNotFound {
                id: ticket_ref.to_string(),
            })
    }

    /// ID as stored, trying the input verbatim before its normalized form
    pub fn resolve_ticket_id(&self, ticket_ref: &str) -> Option<String> {
        let verbatim = ticket_ref.trim();
        if self.store.get(verbatim).is_some() {
            return Some(verbatim.to_string());
        }
        TicketId::parse_str(verbatim)
            .ok()
            .map(|id| id.to_string())
            .filter(|id| self.store.get(id).is_some())
    }
}
