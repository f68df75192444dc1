// # phonebook-core
//
// Core library for the phonebook directory service.
//
// ## Architecture Overview
//
// This library provides everything the server and client share:
// - **Entry**: The directory record (`id`, `name`, `number`) and its wire form
// - **DirectoryStore**: Trait for the authoritative entry collection
// - **MemoryDirectoryStore**: In-memory store, reset to a seed set on restart
// - **IdStrategy**: How new entry ids are allocated
// - **Error**: The error type every crate in the workspace reports with
//
// ## Design Principles
//
// 1. **Injected Store**: Handlers receive a store object, never a global
// 2. **Presence Checks Only**: `name` and `number` are required, not validated
// 3. **Library-First**: The daemon and the client are thin layers on top

pub mod config;
pub mod entry;
pub mod error;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{IdStrategy, PhonebookConfig, ServerConfig, StoreConfig};
pub use entry::{Entry, EntryId, ErrorBody, NewEntry};
pub use error::{Error, Result};
pub use store::{MemoryDirectoryStore, seed_entries};
pub use traits::DirectoryStore;
