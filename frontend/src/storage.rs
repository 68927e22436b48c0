use gloo_console::error;
use vacation_planner_lib::persistence::{KeyValueStore, MemoryStore, PersistenceError};
use web_sys::Storage;

/// `localStorage` when the browser allows it, otherwise a session-only store.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => Self::Local(storage),
            Ok(None) => {
                error!("localStorage is not available, destinations will not survive a reload");
                Self::Memory(MemoryStore::new())
            }
            Err(e) => {
                error!("Failed to open localStorage:", e);
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match self {
            Self::Local(storage) => storage
                .get_item(key)
                .map_err(|e| PersistenceError::Unavailable(format!("{e:?}"))),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(|e| PersistenceError::Write {
                key: key.to_owned(),
                reason: format!("{e:?}"),
            }),
            Self::Memory(store) => store.set(key, value),
        }
    }
}
