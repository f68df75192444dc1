//! Core traits for the phonebook system
//!
//! - [`DirectoryStore`]: The authoritative entry collection

pub mod directory_store;

pub use directory_store::DirectoryStore;
