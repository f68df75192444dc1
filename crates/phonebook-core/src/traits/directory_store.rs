// # Directory Store Trait
//
// Defines the interface for the authoritative entry collection.
//
// ## Purpose
//
// The directory store owns the server's view of the phonebook:
// - The ordered set of entries (insertion order)
// - Name uniqueness on creation
// - Id assignment for new entries
//
// HTTP handlers receive the store as an injected object, so tests can run
// against a fresh store and a persistent backend can be swapped in behind
// the same contract.
//
// ## Implementations
//
// - In-memory: `MemoryDirectoryStore`, reset to the seed set on restart
//
// ## Usage
//
// ```rust
// use phonebook_core::{DirectoryStore, MemoryDirectoryStore, NewEntry};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = MemoryDirectoryStore::seeded();
//
//     let created = store.create(NewEntry::new("Alice", "1-2-3")).await?;
//     let found = store.find_by_id(created.id).await?;
//     assert_eq!(found, Some(created));
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::entry::{Entry, EntryId, NewEntry};

/// Trait for directory store implementations
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks. A
/// name-uniqueness check and the append that follows it must be atomic with
/// respect to other calls.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// List every entry in insertion order
    async fn list_all(&self) -> Result<Vec<Entry>, crate::Error>;

    /// Look up one entry
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Entry))`: The entry with this id
    /// - `Ok(None)`: No entry has this id
    /// - `Err(Error)`: Storage error
    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, crate::Error>;

    /// Create a new entry
    ///
    /// # Returns
    ///
    /// - `Ok(Entry)`: The stored entry with its assigned id
    /// - `Err(Error::Validation)`: `name` or `number` is empty
    /// - `Err(Error::Conflict)`: An entry with the same name already exists
    async fn create(&self, new_entry: NewEntry) -> Result<Entry, crate::Error>;

    /// Replace the number of an existing entry, keeping its id and name
    ///
    /// # Returns
    ///
    /// - `Ok(Entry)`: The updated entry
    /// - `Err(Error::Validation)`: `number` is empty
    /// - `Err(Error::NotFound)`: No entry has this id
    async fn replace(&self, id: EntryId, number: &str) -> Result<Entry, crate::Error>;

    /// Remove an entry
    ///
    /// Removing an unknown id is not an error.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: An entry was removed
    /// - `Ok(false)`: No entry had this id
    async fn remove(&self, id: EntryId) -> Result<bool, crate::Error>;

    /// Number of entries in the store
    async fn count(&self) -> Result<usize, crate::Error>;
}
