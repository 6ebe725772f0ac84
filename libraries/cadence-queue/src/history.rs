//! Navigation history
//!
//! Bounded stack of tracks the cursor has left behind, so `previous()` can
//! retrace real listening order instead of stepping back through play order.

use crate::types::Track;
use std::collections::VecDeque;

/// Navigation history with bounded size
///
/// Most recent entry is at the front. Pushing onto a full history discards
/// the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Rebuild history from a most-recent-first list, keeping at most `max_size`
    pub fn from_tracks(tracks: Vec<Track>, max_size: usize) -> Self {
        let mut tracks: VecDeque<Track> = tracks.into();
        tracks.truncate(max_size);
        Self { tracks, max_size }
    }

    /// Record a track that was just left behind
    pub fn push(&mut self, track: Track) {
        if self.max_size == 0 {
            return;
        }
        self.tracks.push_front(track);
        self.tracks.truncate(self.max_size);
    }

    /// Most recent track (without removing)
    pub fn peek(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Pop most recent track
    pub fn pop(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Drop leading entries that refer to `track`
    ///
    /// Keeps the head from ever naming the track that is currently cursored.
    pub fn drop_leading(&mut self, track: &Track) {
        while self.tracks.front().is_some_and(|head| head.same_as(track)) {
            self.tracks.pop_front();
        }
    }

    /// Iterate entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Snapshot of all entries, most recent first
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_HISTORY_SIZE)
    }
}
