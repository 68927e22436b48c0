use std::{cell::{Cell, RefCell}, collections::HashMap, rc::Rc};

use thiserror::Error;

use crate::destination::Destination;

#[derive(Debug, Error, PartialEq)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("stored destinations are corrupt: {0}")]
    Corrupt(String),
    #[error("failed to serialize destinations: {0}")]
    Serialize(String),
}

/// Synchronous string-keyed storage, e.g. the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `set` fail, like a full quota.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.read_only.get() {
            return Err(PersistenceError::Write {
                key: key.to_owned(),
                reason: "store is read only".into(),
            });
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Reads and writes the whole destination collection as one JSON array.
pub struct DestinationRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DestinationRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, crate::STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_owned(),
        }
    }

    pub fn load(&self) -> Result<Vec<Destination>, PersistenceError> {
        let Some(blob) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&blob).map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    /// Like `load`, but corrupt or unreadable data yields an empty collection.
    pub fn load_or_default(&self) -> Vec<Destination> {
        match self.load() {
            Ok(destinations) => {
                tracing::debug!("Loaded {} destinations", destinations.len());
                destinations
            }
            Err(e) => {
                tracing::warn!("Discarding stored destinations: {e}");
                Vec::new()
            }
        }
    }

    pub fn save(&self, destinations: &[Destination]) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(destinations).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &blob)
    }
}

#[test]
fn test_round_trip() {
    let store = MemoryStore::new();
    let repository = DestinationRepository::new(store.clone());
    let destinations = vec![
        Destination { id: "a".into(), name: "Paris".into(), date: "2025-08-12".into(), lng: 2.35, lat: 48.86 },
        Destination { id: "b".into(), name: "Rome".into(), date: "2025-05-01".into(), lng: 12.49, lat: 41.89 },
    ];

    repository.save(&destinations).unwrap();

    let reloaded = DestinationRepository::new(store).load().unwrap();
    assert_eq!(reloaded, destinations);
}

#[test]
fn test_missing_and_corrupt_blobs() {
    let store = MemoryStore::new();
    let repository = DestinationRepository::new(store.clone());
    assert_eq!(repository.load(), Ok(Vec::new()));

    store.set(crate::STORAGE_KEY, "{not json").unwrap();
    assert!(matches!(repository.load(), Err(PersistenceError::Corrupt(_))));
    assert!(repository.load_or_default().is_empty());
}

#[test]
fn test_read_only_store_rejects_writes() {
    let store = MemoryStore::new();
    store.set_read_only(true);
    let repository = DestinationRepository::new(store);
    assert!(matches!(repository.save(&[]), Err(PersistenceError::Write { .. })));
}
