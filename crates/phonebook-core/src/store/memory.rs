// # Memory Directory Store
//
// In-memory implementation of DirectoryStore.
//
// ## Purpose
//
// Holds the phonebook for the lifetime of the server process. Nothing is
// written anywhere; every restart begins again from the seed set (or empty,
// when seeding is disabled).
//
// ## Concurrency
//
// The entry sequence and the id allocator sit behind one `RwLock`. Reads
// share the lock; create, replace and remove take it exclusively, so the
// name-uniqueness check and the append that follows cannot interleave with
// another create.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{IdStrategy, StoreConfig};
use crate::entry::{Entry, EntryId, NewEntry};
use crate::store::ids::IdAllocator;
use crate::store::seed_entries;
use crate::traits::DirectoryStore;
use crate::Error;

#[derive(Debug)]
struct Inner {
    entries: Vec<Entry>,
    ids: IdAllocator,
}

/// In-memory directory store implementation
///
/// Cloning the store yields another handle to the same collection.
///
/// # Example
///
/// ```rust,no_run
/// use phonebook_core::{DirectoryStore, MemoryDirectoryStore, NewEntry};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryDirectoryStore::seeded();
///     assert_eq!(store.count().await?, 4);
///
///     store.create(NewEntry::new("Alice", "1-2-3")).await?;
///     assert_eq!(store.count().await?, 5);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDirectoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryDirectoryStore {
    /// Create a store from configuration
    pub fn new(config: &StoreConfig) -> Self {
        let entries = if config.seed { seed_entries() } else { Vec::new() };
        Self::with_entries(entries, config.id_strategy)
    }

    /// Create a store holding the seed entries, with random ids
    pub fn seeded() -> Self {
        Self::new(&StoreConfig::default())
    }

    /// Create an empty store, with random ids
    pub fn empty() -> Self {
        Self::new(&StoreConfig::default().with_seed(false))
    }

    /// Create a store holding the given entries
    ///
    /// Entries are kept in the given order. Later entries with an id already
    /// taken by an earlier entry are dropped.
    pub fn with_entries(entries: Vec<Entry>, id_strategy: IdStrategy) -> Self {
        let mut unique: Vec<Entry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|existing| existing.id == entry.id) {
                debug!("Dropping duplicate id {} from initial entries", entry.id);
                continue;
            }
            unique.push(entry);
        }

        let floor = unique.iter().map(|entry| entry.id.get()).max().unwrap_or(0);

        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: unique,
                ids: IdAllocator::new(id_strategy, floor),
            })),
        }
    }
}

impl Default for MemoryDirectoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn list_all(&self) -> Result<Vec<Entry>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.entries.clone())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.entries.iter().find(|entry| entry.id == id).cloned())
    }

    async fn create(&self, new_entry: NewEntry) -> Result<Entry, Error> {
        new_entry.require_present()?;

        let mut guard = self.inner.write().await;
        let Inner { entries, ids } = &mut *guard;

        if entries.iter().any(|entry| entry.name == new_entry.name) {
            return Err(Error::conflict("Name must be unique"));
        }

        let id = ids.next(|candidate| entries.iter().any(|entry| entry.id == candidate));
        let entry = Entry {
            id,
            name: new_entry.name,
            number: new_entry.number,
        };
        entries.push(entry.clone());

        debug!("Created entry {} ({})", entry.id, entry.name);
        Ok(entry)
    }

    async fn replace(&self, id: EntryId, number: &str) -> Result<Entry, Error> {
        if number.is_empty() {
            return Err(Error::validation("Number is missing"));
        }

        let mut guard = self.inner.write().await;
        let entry = guard
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| Error::not_found("Person not found"))?;

        entry.number = number.to_string();
        debug!("Replaced number of entry {} ({})", entry.id, entry.name);
        Ok(entry.clone())
    }

    async fn remove(&self, id: EntryId) -> Result<bool, Error> {
        let mut guard = self.inner.write().await;
        let before = guard.entries.len();
        guard.entries.retain(|entry| entry.id != id);
        let removed = guard.entries.len() < before;

        if removed {
            debug!("Removed entry {}", id);
        } else {
            debug!("Remove of unknown entry {} ignored", id);
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, Error> {
        Ok(self.inner.read().await.entries.len())
    }
}
