//! Typed access to persisted state
//!
//! Reads never fail: a missing, unreadable or corrupt value yields the
//! fallback. Writes are best-effort and only logged when they fail.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::chat::ChatMessage;
use crate::db::KeyValueStore;
use crate::error::StorageError;
use crate::history::History;
use crate::records::PersonalRecords;
use crate::rotation::RotationState;
use crate::session::Session;
use crate::split::Split;

pub const KEY_DAY_INDEX: &str = "firstrep_dayIndex_v3";
pub const KEY_HISTORY: &str = "firstrep_history_v3";
pub const KEY_PRS: &str = "firstrep_prs_v3";
pub const KEY_SPLIT_VAR_INDEX: &str = "firstrep_splitVarIndex_v3";
pub const KEY_CHAT: &str = "firstrep_chat_v3";
pub const KEY_SESSION: &str = "firstrep_session_v3";

/// Every key wiped by a full clear
pub const ALL_KEYS: &[&str] = &[
    KEY_DAY_INDEX,
    KEY_HISTORY,
    KEY_PRS,
    KEY_SPLIT_VAR_INDEX,
    KEY_CHAT,
    KEY_SESSION,
];

pub struct Store<S> {
    backend: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return fallback,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return fallback;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring corrupt value under {}: {}", key, e);
                fallback
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.set(key, &raw));
        match result {
            Ok(()) => debug!("Stored {}", key),
            Err(e) => warn!("Failed to write {}: {}", key, e),
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("Failed to remove {}: {}", key, e);
        }
    }

    pub fn day_index(&self) -> u64 {
        self.read_json(KEY_DAY_INDEX, 0)
    }

    pub fn set_day_index(&mut self, day_index: u64) {
        self.write_json(KEY_DAY_INDEX, &day_index);
    }

    pub fn variation_indices(&self) -> BTreeMap<Split, u64> {
        self.read_json(KEY_SPLIT_VAR_INDEX, BTreeMap::new())
    }

    pub fn set_variation_indices(&mut self, indices: &BTreeMap<Split, u64>) {
        self.write_json(KEY_SPLIT_VAR_INDEX, indices);
    }

    pub fn rotation(&self) -> RotationState {
        RotationState {
            day_index: self.day_index(),
            variation_index_by_split: self.variation_indices(),
        }
    }

    pub fn set_rotation(&mut self, state: &RotationState) {
        self.set_day_index(state.day_index);
        self.set_variation_indices(&state.variation_index_by_split);
    }

    pub fn history(&self) -> History {
        self.read_json(KEY_HISTORY, History::default())
    }

    pub fn set_history(&mut self, history: &History) {
        self.write_json(KEY_HISTORY, history);
    }

    pub fn prs(&self) -> PersonalRecords {
        self.read_json(KEY_PRS, PersonalRecords::default())
    }

    pub fn set_prs(&mut self, prs: &PersonalRecords) {
        self.write_json(KEY_PRS, prs);
    }

    pub fn chat(&self) -> Vec<ChatMessage> {
        self.read_json(KEY_CHAT, Vec::new())
    }

    pub fn set_chat(&mut self, chat: &[ChatMessage]) {
        self.write_json(KEY_CHAT, &chat);
    }

    pub fn pending_session(&self) -> Option<Session> {
        self.read_json(KEY_SESSION, None)
    }

    pub fn set_pending_session(&mut self, session: Option<&Session>) {
        match session {
            Some(session) => self.write_json(KEY_SESSION, session),
            None => self.remove(KEY_SESSION),
        }
    }

    pub fn clear_all(&mut self) {
        for key in ALL_KEYS {
            self.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, MemoryStore};

    /// Backend where every call fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(store.day_index(), 0);
        assert!(store.variation_indices().is_empty());
        assert!(store.history().is_empty());
        assert!(store.prs().is_empty());
        assert!(store.chat().is_empty());
        assert!(store.pending_session().is_none());
    }

    #[test]
    fn test_rotation_roundtrip_sqlite() {
        let mut store = Store::new(Database::open_in_memory().unwrap());
        let mut state = RotationState { day_index: 5, ..Default::default() };
        state.variation_index_by_split.insert(Split::Push, 2);
        store.set_rotation(&state);

        assert_eq!(store.rotation(), state);
        assert_eq!(
            store.backend().get(KEY_SPLIT_VAR_INDEX).unwrap().as_deref(),
            Some(r#"{"push":2}"#)
        );
        assert_eq!(store.backend().get(KEY_DAY_INDEX).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let mut backend = MemoryStore::new();
        backend.set(KEY_DAY_INDEX, "-3").unwrap();
        backend.set(KEY_HISTORY, "{not json").unwrap();
        backend.set(KEY_PRS, "[]").unwrap();
        let store = Store::new(backend);

        assert_eq!(store.day_index(), 0);
        assert!(store.history().is_empty());
        assert!(store.prs().is_empty());
    }

    #[test]
    fn test_broken_backend_never_panics() {
        let mut store = Store::new(BrokenStore);
        store.set_day_index(3);
        store.clear_all();
        assert_eq!(store.day_index(), 0);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_clear_all_removes_every_key() {
        let mut store = Store::new(MemoryStore::new());
        store.set_day_index(4);
        store.set_history(&History::default());
        store.set_chat(&[]);
        store.clear_all();
        for key in ALL_KEYS {
            assert_eq!(store.backend().get(key).unwrap(), None, "{key} survived");
        }
    }
}
