//! Cadence Storage
//!
//! Key-value storage backends for persisting queue state on desktop
//! platforms. The queue library itself never touches the file system; it
//! talks to whatever [`cadence_queue::StateStore`] it is handed.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_queue::{QueueManager, Track};
//! use cadence_storage::JsonFileStore;
//!
//! let store = JsonFileStore::open("./data/queue-state.json").unwrap();
//! let mut manager = QueueManager::new(store);
//! manager.set_queue(vec![Track::new("a", 180)], 0);
//! ```

mod error;
mod file_store;

pub use error::{Result, StorageError};
pub use file_store::JsonFileStore;
