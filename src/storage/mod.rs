//! Ticket persistence
//!
//! A [`TicketStore`] keeps the whole ticket collection in one named blob of
//! a [`BlobStorage`] backend.

mod blob;
mod repository;

pub use blob::{BlobStorage, FileBlobStorage, MemoryBlobStorage};
#[cfg(test)]
pub use blob::MockBlobStorage;
pub use repository::{DEFAULT_STORAGE_KEY, TicketRepository, TicketStore};
