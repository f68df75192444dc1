//! Architectural Contract Test: Directory Store Invariants
//!
//! This test verifies the invariants every DirectoryStore must keep.
//!
//! Constraints verified:
//! - Ids are unique across the store, whatever the allocation strategy
//! - Names are unique on creation, even under concurrent creates
//! - Replace never changes id or name
//! - Remove is idempotent
//!
//! If this test fails, clients can observe duplicate or lost entries.

use phonebook_core::{
    DirectoryStore, EntryId, Error, IdStrategy, MemoryDirectoryStore, NewEntry, StoreConfig,
};
use std::collections::HashSet;
use std::sync::Arc;

async fn assert_ids_unique(store: &dyn DirectoryStore) {
    let entries = store.list_all().await.unwrap();
    let ids: HashSet<EntryId> = entries.iter().map(|entry| entry.id).collect();
    assert_eq!(ids.len(), entries.len(), "Duplicate ids in {:?}", entries);
}

#[tokio::test]
async fn random_ids_are_unique() {
    let store = MemoryDirectoryStore::seeded();

    for i in 0..200 {
        store
            .create(NewEntry::new(format!("Person {}", i), "000"))
            .await
            .expect("create succeeds");
    }

    assert_eq!(store.count().await.unwrap(), 204);
    assert_ids_unique(&store).await;
}

#[tokio::test]
async fn sequential_ids_follow_seed() {
    let config = StoreConfig::default().with_id_strategy(IdStrategy::Sequential);
    let store = MemoryDirectoryStore::new(&config);

    let first = store.create(NewEntry::new("Alice", "1")).await.unwrap();
    let second = store.create(NewEntry::new("Bob", "2")).await.unwrap();

    assert_eq!(first.id, EntryId(5));
    assert_eq!(second.id, EntryId(6));
    assert_ids_unique(&store).await;
}

#[tokio::test]
async fn concurrent_duplicate_creates_admit_exactly_one() {
    let store: Arc<dyn DirectoryStore> = Arc::new(MemoryDirectoryStore::empty());

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create(NewEntry::new("Alice", format!("{}", i)))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(Error::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("Unexpected error: {}", other),
        }
    }

    assert_eq!(created, 1, "Exactly one create should win");
    assert_eq!(conflicts, 15);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn replace_does_not_enforce_name_uniqueness_or_touch_identity() {
    let store = MemoryDirectoryStore::seeded();
    let before = store.find_by_id(EntryId(3)).await.unwrap().unwrap();

    let after = store.replace(EntryId(3), "999").await.unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.name, before.name);
    assert_eq!(after.number, "999");
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn remove_unknown_id_leaves_collection_unchanged() {
    let store = MemoryDirectoryStore::seeded();
    let before = store.list_all().await.unwrap();

    let removed = store.remove(EntryId(999_999)).await.unwrap();

    assert!(!removed);
    assert_eq!(store.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn empty_fields_never_reach_the_collection() {
    let store = MemoryDirectoryStore::seeded();

    for body in [
        NewEntry::new("", ""),
        NewEntry::new("Alice", ""),
        NewEntry::new("", "1-2-3"),
        NewEntry::default(),
    ] {
        let result = store.create(body).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    assert_eq!(store.count().await.unwrap(), 4);
}
