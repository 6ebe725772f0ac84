//! Cadence - Playback Queue Management
//!
//! Platform-agnostic playback queue for Cadence.
//!
//! This crate provides:
//! - Queue ordering (insertion order + play order)
//! - Play-next / play-last insertion, removal, drag-and-drop reorder
//! - Navigation history (bounded, drives "previous")
//! - Shuffle that never interrupts the current track
//! - Repeat modes (None, One, All) for end-of-track handling
//! - Persistence of the whole queue through a pluggable key-value store
//!
//! # Architecture
//!
//! `cadence-queue` only manages ordering and navigation state:
//! - No audio decoding or output (the caller drives its own media sink)
//! - No file system access (storage is provided via the [`StateStore`] trait)
//! - No UI
//!
//! The caller reads the current track after each operation (or drains
//! [`QueueEvent`]s) and tells its player what to load.
//!
//! # Example: Basic Navigation
//!
//! ```rust
//! use cadence_queue::{QueueManager, QueuePosition, Track};
//!
//! let mut manager = QueueManager::default();
//!
//! manager.set_queue(
//!     vec![Track::new("a", 180), Track::new("b", 200), Track::new("c", 240)],
//!     0,
//! );
//! assert_eq!(manager.current_track().unwrap().id, "a");
//!
//! assert_eq!(manager.next().unwrap().id, "b");
//! assert_eq!(manager.previous().unwrap().id, "a");
//!
//! // Plays right after "a"
//! manager.add_to_queue(Track::new("d", 90), QueuePosition::Next);
//! assert_eq!(manager.up_next(1)[0].id, "d");
//! ```
//!
//! # Example: Platform Storage
//!
//! ```rust
//! use cadence_queue::{QueueManager, Result, StateStore, Track};
//! use std::collections::HashMap;
//!
//! // Implement StateStore for your platform
//! #[derive(Default)]
//! struct SessionStorage {
//!     entries: HashMap<String, String>,
//! }
//!
//! impl StateStore for SessionStorage {
//!     fn load(&self, key: &str) -> Result<Option<String>> {
//!         Ok(self.entries.get(key).cloned())
//!     }
//!
//!     fn save(&mut self, key: &str, value: &str) -> Result<()> {
//!         self.entries.insert(key.to_string(), value.to_string());
//!         Ok(())
//!     }
//! }
//!
//! let mut manager = QueueManager::new(SessionStorage::default());
//! manager.set_queue(vec![Track::new("a", 180)], 0);
//! manager.shuffle();
//! assert_eq!(manager.current_track().unwrap().id, "a");
//! ```

mod error;
mod events;
mod history;
mod manager;
mod persistence;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use error::{QueueError, Result};
pub use events::QueueEvent;
pub use history::History;
pub use manager::QueueManager;
pub use persistence::{MemoryStore, PersistedQueue, StateStore};
pub use queue::QueueState;
pub use types::{QueueConfig, QueuePosition, RepeatMode, Track};
