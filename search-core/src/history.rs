//! Recent search queries, most recent first.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Storage key holding the JSON-encoded history.
pub const HISTORY_STORAGE_KEY: &str = "searchHistory";
/// Maximum number of queries kept.
pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored payload. Anything that is not a JSON array of strings
    /// decodes to an empty history; oversized lists are cut to
    /// [`MAX_HISTORY`].
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match serde_json::from_str::<SearchHistory>(raw) {
            Ok(mut history) => {
                history.entries.truncate(MAX_HISTORY);
                history
            }
            Err(e) => {
                log::debug!("Discarding unreadable search history: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Put `query` at the front. Blank queries are ignored and return
    /// `false`; an existing copy of the query moves instead of repeating.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_HISTORY);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// String key/value storage with `localStorage` semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Search history persisted under [`HISTORY_STORAGE_KEY`].
///
/// Every call reads storage again so that other tabs' writes are seen.
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> SearchHistory {
        SearchHistory::from_json(self.store.get(HISTORY_STORAGE_KEY).as_deref())
    }

    pub fn record(&self, query: &str) -> Result<SearchHistory, StoreError> {
        let mut history = self.load();
        if history.record(query) {
            self.store.set(HISTORY_STORAGE_KEY, &history.to_json())?;
        }
        Ok(history)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(HISTORY_STORAGE_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
