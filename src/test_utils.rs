//! Test utilities for maintenance-desk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::cli::handlers::base::{DATA_DIR_NAME, STORE_DIR_NAME};
use crate::cli::utils::DESK_DIR_NAME;
use crate::core::{Ticket, TicketBuilder};
use crate::storage::{DEFAULT_STORAGE_KEY, FileBlobStorage, TicketRepository, TicketStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for a temporary desk
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
    pub desk_dir: PathBuf,
    pub store: TicketStore<FileBlobStorage>,
}

impl TestProject {
    /// Create a new test project with an initialized desk directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_root = temp_dir.path().to_path_buf();
        let desk_dir = project_root.join(DESK_DIR_NAME);

        std::fs::create_dir_all(desk_dir.join(DATA_DIR_NAME)).expect("Failed to create desk dir");

        let store = TicketStore::new(
            FileBlobStorage::new(desk_dir.join(STORE_DIR_NAME)),
            DEFAULT_STORAGE_KEY,
        );

        Self {
            temp_dir,
            project_root,
            desk_dir,
            store,
        }
    }

    /// Create a test project with sample tickets, oldest first
    pub fn with_sample_tickets() -> Self {
        let project = Self::new();
        for (day, category, unit) in [
            (1, "Plumbing", "A101"),
            (2, "Electrical", "B204"),
            (3, "Elevator", "C301"),
        ] {
            project
                .store
                .submit(
                    TicketBuilder::new()
                        .created_at(format!("2024-03-0{day}T09:00:00.000Z"))
                        .category(category)
                        .unit_code(unit),
                )
                .expect("Failed to save ticket");
        }
        project
    }

    /// Get the path as a string
    pub fn root_path_str(&self) -> &str {
        self.project_root.to_str().expect("Invalid path")
    }

    /// Create and save a ticket
    pub fn create_ticket(&self, category: &str, unit_code: &str) -> Ticket {
        self.store
            .submit(TicketBuilder::new().category(category).unit_code(unit_code))
            .expect("Failed to save ticket")
    }

    /// Write a file into the desk's data directory
    pub fn write_data_file(&self, name: &str, content: &str) {
        std::fs::write(self.desk_dir.join(DATA_DIR_NAME).join(name), content)
            .expect("Failed to write data file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.desk_dir.exists());
        assert!(project.store.list().is_empty());
    }

    #[test]
    fn test_project_with_sample_tickets() {
        let project = TestProject::with_sample_tickets();
        let tickets = project.store.list();
        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].get("category"), Some("Elevator"));
    }
}
