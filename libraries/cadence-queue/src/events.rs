//! Queue events
//!
//! Recorded by the manager whenever something the caller displays or forwards
//! to its media sink changes. The caller drains them after each operation.

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the queue manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// The current track changed; the media sink should load `track_id`
    CurrentTrackChanged {
        /// ID of the new current track (`None` once the queue is empty)
        track_id: Option<String>,
        /// ID of the track that was current before
        previous_track_id: Option<String>,
    },

    /// Tracks were set, added, removed, reordered or reshuffled
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle was switched on or off
    ShuffleChanged {
        shuffled: bool,
    },

    /// Repeat mode changed
    RepeatModeChanged {
        mode: RepeatMode,
    },
}
