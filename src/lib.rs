//! maintenance-desk - a small maintenance-ticket intake desk
//!
//! The crate provides:
//! - a ticket store keeping the whole collection in one named blob
//! - a lenient CSV reader and a fully-quoting CSV writer for export
//! - category and unit reference data with a built-in fallback
//! - the `maintenance-desk` command-line front-end
//!
//! # Example
//!
//! ```rust
//! use maintenance_desk::storage::{MemoryBlobStorage, TicketRepository, TicketStore};
//!
//! let store = TicketStore::with_default_key(MemoryBlobStorage::new());
//! let ticket = store
//!     .append([("category", "Plumbing"), ("unit_code", "A101")])
//!     .unwrap();
//!
//! store.close(ticket.id().unwrap()).unwrap();
//! let csv = maintenance_desk::codec::serialize(&store.list()).unwrap();
//! assert!(csv.starts_with("id,status,created_at,updated_at,category,unit_code"));
//! ```

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::indexing_slicing)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod reference;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{DeskError, Result};
