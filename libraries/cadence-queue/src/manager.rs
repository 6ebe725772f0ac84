//! Queue manager - state ownership and persistence
//!
//! Wraps one [`QueueState`] and one [`StateStore`]. State is rehydrated once
//! in the constructor and written back after every call that changed it. Nothing
//! here reports an error to the caller: bad indices are no-ops, empty-queue
//! navigation returns `None`, and storage failures are logged and dropped.

use crate::{
    error::Result,
    events::QueueEvent,
    persistence::{MemoryStore, PersistedQueue, StateStore},
    queue::QueueState,
    types::{QueueConfig, QueuePosition, RepeatMode, Track},
};
use rand::Rng;
use tracing::{debug, info, warn};

/// What the caller can observe, captured before an operation
struct Observed {
    current: Option<String>,
    shuffled: bool,
    repeat: RepeatMode,
    record: PersistedQueue,
}

/// Central queue management
///
/// Owned by exactly one UI context; all calls are expected to come from the
/// same event loop, so there is no internal locking.
pub struct QueueManager<S: StateStore = MemoryStore> {
    state: QueueState,
    store: S,
    config: QueueConfig,

    // Event queue for UI / media sink synchronization
    pending_events: Vec<QueueEvent>,
}

impl<S: StateStore> QueueManager<S> {
    /// Create a manager with default configuration, restoring any stored state
    pub fn new(store: S) -> Self {
        Self::with_config(store, QueueConfig::default())
    }

    /// Create a manager, restoring any stored state
    pub fn with_config(store: S, config: QueueConfig) -> Self {
        let state = Self::load_state(&store, &config);
        Self {
            state,
            store,
            config,
            pending_events: Vec::new(),
        }
    }

    /// Read the stored record, falling back to an empty queue on any failure
    fn load_state(store: &S, config: &QueueConfig) -> QueueState {
        let raw = match store.load(&config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %config.storage_key, "No stored queue state");
                return QueueState::new(config.history_size);
            }
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "Failed to read queue state");
                return QueueState::new(config.history_size);
            }
        };

        match PersistedQueue::from_json(&raw).and_then(|r| r.into_state(config.history_size)) {
            Ok(state) => {
                info!(
                    tracks = state.len(),
                    shuffled = state.is_shuffled(),
                    "Restored queue state"
                );
                state
            }
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "Discarding stored queue state");
                QueueState::new(config.history_size)
            }
        }
    }

    /// Write the full state to the store
    ///
    /// Called automatically after every mutation (errors logged and dropped);
    /// call directly to observe the error.
    pub fn save_state(&mut self) -> Result<()> {
        let json = PersistedQueue::from_state(&self.state).to_json()?;
        self.store.save(&self.config.storage_key, &json)
    }

    // ===== Queue Management =====

    /// Replace the entire queue and select `start_index`
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        let before = self.observe();
        debug!(tracks = tracks.len(), start_index, "Setting queue");
        self.state.set_queue(tracks, start_index);
        self.commit(before, true);
    }

    /// Add a track right after the current one, or at the end
    pub fn add_to_queue(&mut self, track: Track, position: QueuePosition) {
        let before = self.observe();
        debug!(track_id = %track.id, ?position, "Adding track to queue");
        self.state.add(track, position);
        self.commit(before, true);
    }

    /// Remove the track at a play-order position
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let before = self.observe();
        let removed = self.state.remove(index);
        match &removed {
            Some(track) => debug!(index, track_id = %track.id, "Removed track from queue"),
            None => debug!(index, len = self.state.len(), "Ignoring remove of invalid index"),
        }
        self.commit(before, removed.is_some());
        removed
    }

    /// Move a track within the queue (drag-and-drop reorder)
    ///
    /// Out-of-range indices are ignored. Returns whether the move happened.
    pub fn move_in_queue(&mut self, from: usize, to: usize) -> bool {
        let before = self.observe();
        let moved = self.state.move_track(from, to);
        if !moved {
            debug!(from, to, len = self.state.len(), "Ignoring move of invalid index");
        }
        self.commit(before, moved && from != to);
        moved
    }

    /// Reset to an empty queue
    pub fn clear_queue(&mut self) {
        let before = self.observe();
        self.state.clear();
        self.commit(before, true);
    }

    // ===== Navigation =====

    /// Select the track at a play-order position
    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        let before = self.observe();
        let landed = self.state.jump_to(index).is_some();
        self.commit(before, false);
        self.landed(landed)
    }

    /// Skip to the next track in play order (wraps at the end)
    pub fn next(&mut self) -> Option<&Track> {
        let before = self.observe();
        let landed = self.state.next().is_some();
        self.commit(before, false);
        self.landed(landed)
    }

    /// Go back to the previously visited track
    pub fn previous(&mut self) -> Option<&Track> {
        let before = self.observe();
        let landed = self.state.previous().is_some();
        self.commit(before, false);
        self.landed(landed)
    }

    /// Handle the media sink reporting a natural end of track
    ///
    /// Returns the track to play now, or `None` to stop.
    pub fn track_ended(&mut self) -> Option<&Track> {
        let before = self.observe();
        let landed = self.state.track_ended().is_some();
        self.commit(before, false);
        self.landed(landed)
    }

    // ===== Shuffle & Repeat =====

    /// Shuffle upcoming tracks; the current track keeps playing
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Shuffle using the supplied RNG
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let before = self.observe();
        self.state.shuffle_with(rng);
        self.commit(before, true);
    }

    /// Restore insertion order; the current track keeps playing
    pub fn unshuffle(&mut self) {
        let before = self.observe();
        self.state.unshuffle();
        self.commit(before, true);
    }

    /// Switch shuffle on or off
    pub fn toggle_shuffle(&mut self) {
        if self.state.is_shuffled() {
            self.unshuffle();
        } else {
            self.shuffle();
        }
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        let before = self.observe();
        self.state.set_repeat_mode(mode);
        self.commit(before, false);
    }

    // ===== State Queries =====

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    /// Play-order position of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    /// All tracks in play order
    pub fn tracks(&self) -> Vec<&Track> {
        self.state.tracks()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Navigation history, most recent first
    pub fn history(&self) -> Vec<&Track> {
        self.state.history().iter().collect()
    }

    /// Preview of the next `count` tracks
    pub fn up_next(&self, count: usize) -> Vec<&Track> {
        self.state.up_next(count)
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn is_shuffled(&self) -> bool {
        self.state.is_shuffled()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.state.repeat_mode()
    }

    /// Full queue state (read-only)
    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Backing store (read-only)
    pub fn store(&self) -> &S {
        &self.store
    }

    // ===== Events =====

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn observe(&self) -> Observed {
        Observed {
            current: self.state.current_track().map(|t| t.id.clone()),
            shuffled: self.state.is_shuffled(),
            repeat: self.state.repeat_mode(),
            record: PersistedQueue::from_state(&self.state),
        }
    }

    fn landed(&self, landed: bool) -> Option<&Track> {
        if landed {
            self.state.current_track()
        } else {
            None
        }
    }

    /// Record events for whatever changed, then persist if anything did
    fn commit(&mut self, before: Observed, queue_changed: bool) {
        if queue_changed {
            self.pending_events.push(QueueEvent::QueueChanged {
                length: self.state.len(),
            });
        }

        let current = self.state.current_track().map(|t| t.id.clone());
        if current != before.current {
            debug!(
                from = before.current.as_deref().unwrap_or("-"),
                to = current.as_deref().unwrap_or("-"),
                "Current track changed"
            );
            self.pending_events.push(QueueEvent::CurrentTrackChanged {
                track_id: current,
                previous_track_id: before.current,
            });
        }

        if self.state.is_shuffled() != before.shuffled {
            self.pending_events.push(QueueEvent::ShuffleChanged {
                shuffled: self.state.is_shuffled(),
            });
        }

        if self.state.repeat_mode() != before.repeat {
            self.pending_events.push(QueueEvent::RepeatModeChanged {
                mode: self.state.repeat_mode(),
            });
        }

        if PersistedQueue::from_state(&self.state) == before.record {
            return;
        }

        if let Err(e) = self.save_state() {
            warn!(key = %self.config.storage_key, error = %e, "Failed to persist queue state");
        }
    }
}

impl Default for QueueManager<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}
