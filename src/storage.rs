use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value slots, the shape browser local storage offers.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }
}

/// A cafe + table pair. Scopes the persisted cart and history slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub cafe_id: String,
    pub table_id: String,
}

impl SessionKey {
    pub fn new(cafe_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        SessionKey {
            cafe_id: cafe_id.into(),
            table_id: table_id.into(),
        }
    }

    pub fn cart_slot(&self) -> String {
        format!("orderList_{}_{}", self.cafe_id, self.table_id)
    }

    pub fn history_slot(&self) -> String {
        format!("orderHistory_{}_{}", self.cafe_id, self.table_id)
    }
}
