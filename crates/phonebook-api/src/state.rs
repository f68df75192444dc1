//! Shared handler state

use phonebook_core::DirectoryStore;
use std::sync::Arc;

/// State handed to every handler
///
/// Holds the injected directory store. Cloning is cheap: clones share the
/// same store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DirectoryStore>,
}

impl AppState {
    /// Create state around a store
    pub fn new(store: impl DirectoryStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// The directory store
    pub fn store(&self) -> &dyn DirectoryStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
