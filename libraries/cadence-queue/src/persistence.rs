//! Queue state persistence
//!
//! The queue is stored as one JSON record under a single key, overwritten
//! wholesale after every mutation and read once at startup. The backing
//! key-value store is supplied by the platform through [`StateStore`].

use crate::error::{QueueError, Result};
use crate::history::History;
use crate::queue::QueueState;
use crate::shuffle::is_permutation;
use crate::types::{RepeatMode, Track};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key-value store the queue state is persisted to
///
/// Implement this for your platform (file, browser storage, database row).
pub trait StateStore {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
///
/// Useful as a default and for tests. Cloning shares nothing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key (e.g. to simulate state from a previous session)
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialized queue record
///
/// `cursor` is `null` when nothing is selected. `history` is most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedQueue {
    pub base_order: Vec<Track>,
    pub play_order: Vec<usize>,
    pub cursor: Option<usize>,
    pub shuffled: bool,
    #[serde(default)]
    pub history: Vec<Track>,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
}

impl PersistedQueue {
    /// Snapshot live state
    pub fn from_state(state: &QueueState) -> Self {
        Self {
            base_order: state.base_order().to_vec(),
            play_order: state.play_order().to_vec(),
            cursor: state.current_index(),
            shuffled: state.is_shuffled(),
            history: state.history().to_vec(),
            repeat_mode: state.repeat_mode(),
        }
    }

    /// Check the record against queue invariants
    ///
    /// Over-long history is not an error; it is truncated on restore.
    pub fn validate(&self) -> Result<()> {
        let len = self.base_order.len();

        if !is_permutation(&self.play_order, len) {
            return Err(QueueError::corrupt(format!(
                "play order {:?} is not a permutation of 0..{}",
                self.play_order, len
            )));
        }

        match self.cursor {
            Some(cursor) if cursor >= len => Err(QueueError::corrupt(format!(
                "cursor {} out of range for {} tracks",
                cursor, len
            ))),
            None if len > 0 => Err(QueueError::corrupt("non-empty queue without a cursor")),
            _ => Ok(()),
        }
    }

    /// Rebuild live state, keeping at most `history_size` history entries
    pub fn into_state(self, history_size: usize) -> Result<QueueState> {
        self.validate()?;

        Ok(QueueState::from_parts(
            self.base_order,
            self.play_order,
            self.cursor,
            self.shuffled,
            History::from_tracks(self.history, history_size),
            self.repeat_mode,
        ))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueuePosition;

    fn sample_state() -> QueueState {
        let mut state = QueueState::default();
        state.set_queue(
            vec![Track::new("a", 100), Track::new("b", 200), Track::new("c", 300)],
            0,
        );
        state.next();
        state.add(Track::new("d", 50), QueuePosition::Next);
        state.set_repeat_mode(RepeatMode::All);
        state
    }

    #[test]
    fn snapshot_restores_identical_state() {
        let state = sample_state();
        let record = PersistedQueue::from_state(&state);
        let json = record.to_json().unwrap();

        let restored = PersistedQueue::from_json(&json)
            .unwrap()
            .into_state(20)
            .unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn layout_uses_camel_case_keys() {
        let json = PersistedQueue::from_state(&sample_state()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("baseOrder").is_some());
        assert!(value.get("playOrder").is_some());
        assert_eq!(value["cursor"], 1);
        assert_eq!(value["repeatMode"], "all");
        assert_eq!(value["history"][0]["id"], "a");
    }

    #[test]
    fn rejects_non_permutation() {
        let mut record = PersistedQueue::from_state(&sample_state());
        record.play_order = vec![0, 0, 1, 2];
        assert!(matches!(
            record.into_state(20),
            Err(QueueError::CorruptState(_))
        ));
    }

    #[test]
    fn rejects_cursor_out_of_range() {
        let mut record = PersistedQueue::from_state(&sample_state());
        record.cursor = Some(4);
        assert!(record.validate().is_err());
    }

    #[test]
    fn rejects_missing_cursor_on_populated_queue() {
        let mut record = PersistedQueue::from_state(&sample_state());
        record.cursor = None;
        assert!(record.validate().is_err());
    }

    #[test]
    fn empty_record_is_valid() {
        let record = PersistedQueue::from_state(&QueueState::default());
        assert!(record.validate().is_ok());
        assert_eq!(record.cursor, None);
    }

    #[test]
    fn long_history_is_truncated() {
        let mut record = PersistedQueue::from_state(&sample_state());
        record.history = (0..30).map(|i| Track::new(format!("h{}", i), 60)).collect();

        let state = record.into_state(20).unwrap();
        assert_eq!(state.history().len(), 20);
        assert_eq!(state.history().peek().unwrap().id, "h0");
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"baseOrder":[{"id":"a","durationSeconds":5}],"playOrder":[0],"cursor":0,"shuffled":false}"#;
        let state = PersistedQueue::from_json(json)
            .unwrap()
            .into_state(20)
            .unwrap();
        assert_eq!(state.repeat_mode(), RepeatMode::None);
        assert!(state.history().is_empty());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.get("k"), Some("v"));
    }
}
