use super::blob::BlobStorage;
use crate::core::{Ticket, TicketBuilder, timestamp_now};
use crate::error::Result;

/// Storage key used when none is configured
///
/// The version suffix is the only migration mechanism: changing the record
/// shape means moving to a new key and leaving the old blob behind.
pub const DEFAULT_STORAGE_KEY: &str = "mdl_r_tickets_v1";

/// Repository trait for ticket storage operations
pub trait TicketRepository {
    /// All tickets, newest `created_at` first
    ///
    /// Never fails: unreadable or corrupted data reads as an empty list.
    fn list(&self) -> Vec<Ticket>;

    /// Finds a ticket by ID
    fn get(&self, id: &str) -> Option<Ticket>;

    /// Persists a new submission and returns the stored ticket
    fn submit(&self, submission: TicketBuilder) -> Result<Ticket>;

    /// Closes every ticket with the ID and returns the first of them
    ///
    /// `Ok(None)` and no write when the ID is unknown.
    fn close(&self, id: &str) -> Result<Option<Ticket>>;

    /// Erases every ticket
    fn clear(&self) -> Result<()>;

    /// Appends a ticket built from submitted fields
    fn append<I, K, V>(&self, fields: I) -> Result<Ticket>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        Self: Sized,
    {
        self.submit(TicketBuilder::new().fields(fields))
    }

    /// Finds tickets matching a predicate, newest first
    fn find<F>(&self, predicate: F) -> Vec<Ticket>
    where
        F: Fn(&Ticket) -> bool,
        Self: Sized,
    {
        self.list().into_iter().filter(predicate).collect()
    }

    /// Counts tickets matching a predicate
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Ticket) -> bool,
        Self: Sized,
    {
        self.list().iter().filter(|t| predicate(t)).count()
    }
}

/// Ticket collection persisted as one JSON array under a single key
///
/// Every mutation reads the whole collection, changes it, and writes the
/// whole collection back.
#[derive(Debug)]
pub struct TicketStore<S> {
    storage: S,
    key: String,
}

impl<S: BlobStorage> TicketStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Store under [`DEFAULT_STORAGE_KEY`]
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// All tickets in stored (insertion) order
    pub fn load_all(&self) -> Vec<Ticket> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read ticket store '{}': {}", self.key, e);
                return Vec::new();
            },
        };

        match serde_json::from_str::<Vec<Ticket>>(&raw) {
            Ok(tickets) => {
                tracing::debug!("Loaded {} tickets from '{}'", tickets.len(), self.key);
                tickets
            },
            Err(e) => {
                tracing::warn!(
                    "Ticket store '{}' is unreadable, treating it as empty: {}",
                    self.key,
                    e
                );
                Vec::new()
            },
        }
    }

    fn save_all(&self, tickets: &[Ticket]) -> Result<()> {
        let raw = serde_json::to_string(tickets)?;
        self.storage.set(&self.key, &raw)
    }
}

impl<S: BlobStorage> TicketRepository for TicketStore<S> {
    fn list(&self) -> Vec<Ticket> {
        let mut tickets = self.load_all();
        tickets.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        tickets
    }

    fn get(&self, id: &str) -> Option<Ticket> {
        self.load_all()
            .into_iter()
            .find(|ticket| ticket.id() == Some(id))
    }

    fn submit(&self, submission: TicketBuilder) -> Result<Ticket> {
        let ticket = submission.build();
        let mut tickets = self.load_all();
        tickets.push(ticket.clone());
        self.save_all(&tickets)?;
        tracing::info!(
            "Ticket {} created ({} in store)",
            ticket.id().unwrap_or_default(),
            tickets.len()
        );
        Ok(ticket)
    }

    fn close(&self, id: &str) -> Result<Option<Ticket>> {
        let mut tickets = self.load_all();
        let closed_at = timestamp_now();
        let mut closed: Option<Ticket> = None;
        let mut count = 0;
        // Every ticket sharing the id is closed with the same timestamp
        for ticket in tickets.iter_mut().filter(|t| t.id() == Some(id)) {
            ticket.close(closed_at.clone());
            closed.get_or_insert_with(|| ticket.clone());
            count += 1;
        }

        if closed.is_none() {
            tracing::debug!("Close requested for unknown ticket {}", id);
            return Ok(None);
        }

        self.save_all(&tickets)?;
        tracing::info!("Ticket {} closed ({} record(s))", id, count);
        Ok(closed)
    }

    fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        tracing::info!("Ticket store '{}' cleared", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Status, TicketId, fields};
    use crate::error::DeskError;
    use crate::storage::{FileBlobStorage, MemoryBlobStorage, MockBlobStorage};
    use mockall::predicate::eq;
    use tempfile::TempDir;

    fn memory_store() -> TicketStore<MemoryBlobStorage> {
        TicketStore::with_default_key(MemoryBlobStorage::new())
    }

    #[test]
    fn test_list_empty_store() {
        let store = memory_store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_append_then_list() {
        let store = memory_store();
        store
            .append([("category", "Plumbing"), ("unit_code", "A101")])
            .expect("Failed to append ticket");

        let tickets = store.list();
        assert_eq!(tickets.len(), 1);
        let ticket = &tickets[0];
        assert_eq!(ticket.status(), Some(Status::Open));
        assert!(TicketId::is_well_formed(ticket.id().unwrap()));
        assert_eq!(ticket.get(fields::CREATED_AT), ticket.get(fields::UPDATED_AT));
        assert_eq!(ticket.get(fields::CATEGORY), Some("Plumbing"));
    }

    #[test]
    fn test_submitted_status_overrides_generated() {
        let store = memory_store();
        let ticket = store.append([("status", "Closed")]).unwrap();
        assert_eq!(ticket.status(), Some(Status::Closed));
    }

    #[test]
    fn test_list_newest_first() {
        let store = memory_store();
        store
            .submit(TicketBuilder::new().created_at("2024-01-01T08:00:00.000Z").unit_code("old"))
            .unwrap();
        store
            .submit(TicketBuilder::new().created_at("2024-01-02T08:00:00.000Z").unit_code("new"))
            .unwrap();
        // a ticket without created_at sorts last
        store.append([("created_at", "")]).unwrap();

        let units: Vec<_> = store
            .list()
            .iter()
            .map(|t| t.get_or_empty(fields::UNIT_CODE).to_string())
            .collect();
        assert_eq!(units, vec!["new", "old", ""]);
    }

    #[test]
    fn test_close_existing_ticket() {
        let store = memory_store();
        let ticket = store.append([("description", "No power")]).unwrap();
        let id = ticket.id().unwrap().to_string();

        let closed = store.close(&id).unwrap().expect("ticket should exist");
        assert_eq!(closed.status(), Some(Status::Closed));
        assert!(!closed.get_or_empty(fields::CLOSED_AT).is_empty());
        assert_eq!(closed.get(fields::UPDATED_AT), ticket.get(fields::UPDATED_AT));
        assert_eq!(closed.get(fields::DESCRIPTION), Some("No power"));

        let stored = store.get(&id).unwrap();
        assert_eq!(stored, closed);
    }

    #[test]
    fn test_close_closes_every_ticket_with_the_id() {
        let store = memory_store();
        store.append([("id", "R-DUP001"), ("unit_code", "A1")]).unwrap();
        store.append([("id", "R-DUP001"), ("unit_code", "A2")]).unwrap();
        store.append([("id", "R-OTHER1"), ("unit_code", "A3")]).unwrap();

        let closed = store.close("R-DUP001").unwrap().expect("ticket should exist");
        assert_eq!(closed.get(fields::UNIT_CODE), Some("A1"));

        let tickets = store.load_all();
        let statuses: Vec<_> = tickets.iter().map(Ticket::status).collect();
        assert_eq!(
            statuses,
            vec![Some(Status::Closed), Some(Status::Closed), Some(Status::Open)]
        );
        assert_eq!(
            tickets[0].get(fields::CLOSED_AT),
            tickets[1].get(fields::CLOSED_AT)
        );
    }

    #[test]
    fn test_close_unknown_ticket_is_noop() {
        let store = memory_store();
        store.append([("unit_code", "A1")]).unwrap();
        let before = store.load_all();

        assert!(store.close("R-ZZZZZZ").unwrap().is_none());
        assert_eq!(store.load_all(), before);
    }

    #[test]
    fn test_close_unknown_ticket_does_not_write() {
        let mut storage = MockBlobStorage::new();
        storage
            .expect_get()
            .with(eq("tickets"))
            .returning(|_| Ok(Some("[]".to_string())));
        storage.expect_set().times(0);

        let store = TicketStore::new(storage, "tickets");
        assert!(store.close("R-ABCDEF").unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let store = memory_store();
        store.append([("unit_code", "A1")]).unwrap();
        store.append([("unit_code", "A2")]).unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_corrupted_blob_reads_as_empty() {
        let storage = MemoryBlobStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = TicketStore::with_default_key(storage);
        assert!(store.list().is_empty());

        // appending over corrupted data starts a fresh collection
        store.append([("unit_code", "A1")]).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_read_failure_reads_as_empty() {
        let mut storage = MockBlobStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(DeskError::custom("disk on fire")));
        let store = TicketStore::new(storage, "tickets");
        assert!(store.list().is_empty());
        assert!(store.get("R-AAAAAA").is_none());
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut storage = MockBlobStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(DeskError::custom("read-only")));
        let store = TicketStore::new(storage, "tickets");
        assert!(store.append([("unit_code", "A1")]).is_err());
    }

    #[test]
    fn test_find_and_count() {
        let store = memory_store();
        let first = store.append([("category", "Plumbing")]).unwrap();
        store.append([("category", "Electrical")]).unwrap();
        store.close(first.id().unwrap()).unwrap();

        assert_eq!(store.count(|t| t.status() == Some(Status::Open)), 1);
        let found = store.find(|t| t.get(fields::CATEGORY) == Some("Plumbing"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status(), Some(Status::Closed));
    }

    #[test]
    fn test_file_backed_store_persists() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("store");

        let id = {
            let store = TicketStore::with_default_key(FileBlobStorage::new(&dir));
            let ticket = store.append([("unit_code", "B7")]).unwrap();
            ticket.id().unwrap().to_string()
        };

        let reopened = TicketStore::with_default_key(FileBlobStorage::new(&dir));
        let ticket = reopened.get(&id).expect("ticket should persist");
        assert_eq!(ticket.get(fields::UNIT_CODE), Some("B7"));
    }
}
