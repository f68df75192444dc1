//! Test doubles and common utilities for client contract tests

#![allow(dead_code)]

use async_trait::async_trait;
use phonebook_api::{AppState, create_router};
use phonebook_client::PersonsService;
use phonebook_core::{
    Entry, EntryId, Error, IdStrategy, MemoryDirectoryStore, NewEntry, Result, StoreConfig,
    seed_entries,
};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory persons service that mimics the server's responses
///
/// Counts every call and can be switched into a failing mode.
pub struct MockPersonsService {
    entries: Arc<Mutex<Vec<Entry>>>,
    next_id: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
    get_all_count: Arc<AtomicUsize>,
    create_count: Arc<AtomicUsize>,
    update_count: Arc<AtomicUsize>,
    remove_count: Arc<AtomicUsize>,
}

impl MockPersonsService {
    /// A service holding the four seed entries
    pub fn seeded() -> Self {
        Self::with_entries(seed_entries())
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let next_id = entries.iter().map(|entry| entry.id.get()).max().unwrap_or(0) + 1;
        Self {
            entries: Arc::new(Mutex::new(entries)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            failing: Arc::new(AtomicBool::new(false)),
            get_all_count: Arc::new(AtomicUsize::new(0)),
            create_count: Arc::new(AtomicUsize::new(0)),
            update_count: Arc::new(AtomicUsize::new(0)),
            remove_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a new MockPersonsService that shares state and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            entries: Arc::clone(&other.entries),
            next_id: Arc::clone(&other.next_id),
            failing: Arc::clone(&other.failing),
            get_all_count: Arc::clone(&other.get_all_count),
            create_count: Arc::clone(&other.create_count),
            update_count: Arc::clone(&other.update_count),
            remove_count: Arc::clone(&other.remove_count),
        }
    }

    /// Make every following call fail with a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Remove an entry behind the client's back
    pub fn remove_on_server(&self, id: EntryId) {
        self.entries.lock().unwrap().retain(|entry| entry.id != id);
    }

    pub fn server_entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn get_all_count(&self) -> usize {
        self.get_all_count.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn remove_count(&self) -> usize {
        self.remove_count.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::http("Request failed: connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl PersonsService for MockPersonsService {
    async fn get_all(&self) -> Result<Vec<Entry>> {
        self.get_all_count.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self.server_entries())
    }

    async fn create(&self, new_entry: &NewEntry) -> Result<Entry> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;

        if new_entry.name.is_empty() || new_entry.number.is_empty() {
            return Err(Error::status(400, "Name or number is missing"));
        }

        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|entry| entry.name == new_entry.name) {
            return Err(Error::status(400, "Name must be unique"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = Entry::new(id, new_entry.name.clone(), new_entry.number.clone());
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: EntryId, new_entry: &NewEntry) -> Result<Entry> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;

        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.number = new_entry.number.clone();
                Ok(entry.clone())
            }
            None => Err(Error::status(404, "Person not found")),
        }
    }

    async fn remove(&self, id: EntryId) -> Result<()> {
        self.remove_count.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.remove_on_server(id);
        Ok(())
    }
}

/// Serve the real router on an ephemeral local port
///
/// Returns the base URL and a handle to the backing store.
pub async fn spawn_server() -> (String, MemoryDirectoryStore) {
    let config = StoreConfig::default().with_id_strategy(IdStrategy::Sequential);
    let store = MemoryDirectoryStore::new(&config);
    let router = create_router(AppState::new(store.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", address), store)
}
