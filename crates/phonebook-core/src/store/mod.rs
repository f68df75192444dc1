// # Directory Store Implementations
//
// This module provides implementations of the DirectoryStore trait and the
// fixed seed set the server starts with.

pub mod ids;
pub mod memory;

pub use ids::{IdAllocator, MAX_ENTRY_ID};
pub use memory::MemoryDirectoryStore;

use crate::entry::Entry;

/// The entries a freshly started server holds
pub fn seed_entries() -> Vec<Entry> {
    vec![
        Entry::new(1, "Arto Hellas", "040-123456"),
        Entry::new(2, "Ada Lovelace", "39-44-5323523"),
        Entry::new(3, "Dan Abramov", "12-43-234345"),
        Entry::new(4, "Mary Poppendick", "39-23-6423122"),
    ]
}
