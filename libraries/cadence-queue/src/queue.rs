//! Queue state machine
//!
//! Single source of truth for traversal order:
//!
//! ```text
//! base_order:  [A, B, C, D]        insertion order, never reshuffled
//! play_order:  [2, 0, 3, 1]        indices into base_order, visit order
//! cursor:      1                   position in play_order  -> A
//! history:     [C]                 tracks left behind, most recent first
//! ```
//!
//! Every caller-facing index addresses `play_order`. Shuffling rewrites
//! `play_order` in place; there is no second index array to keep in sync.

use crate::history::History;
use crate::shuffle::anchored_permutation;
use crate::types::{QueuePosition, RepeatMode, Track};
use rand::Rng;

/// Playback queue state
///
/// Invariants:
/// - `play_order` is a permutation of `0..base_order.len()`
/// - `cursor` is `Some(i)` with `i < play_order.len()` iff the queue is non-empty
/// - the head of `history` is never the current track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueState {
    /// Tracks in the order the caller supplied them
    base_order: Vec<Track>,

    /// Visit order, as indices into `base_order`
    play_order: Vec<usize>,

    /// Position in `play_order` of the current track
    cursor: Option<usize>,

    /// Whether `play_order` came from a shuffle
    shuffled: bool,

    /// Tracks navigated away from
    history: History,

    /// Caller-set repeat mode
    repeat_mode: RepeatMode,
}

impl QueueState {
    /// Create an empty queue
    pub fn new(history_size: usize) -> Self {
        Self {
            base_order: Vec::new(),
            play_order: Vec::new(),
            cursor: None,
            shuffled: false,
            history: History::new(history_size),
            repeat_mode: RepeatMode::None,
        }
    }

    /// Assemble state from already-validated parts
    pub(crate) fn from_parts(
        base_order: Vec<Track>,
        play_order: Vec<usize>,
        cursor: Option<usize>,
        shuffled: bool,
        history: History,
        repeat_mode: RepeatMode,
    ) -> Self {
        let mut state = Self {
            base_order,
            play_order,
            cursor,
            shuffled,
            history,
            repeat_mode,
        };
        if state.is_empty() {
            state.history.clear();
        }
        state.settle_history();
        state
    }

    // ===== Queries =====

    pub fn len(&self) -> usize {
        self.play_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.play_order.is_empty()
    }

    /// Position of the current track in play order
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.track_at(c))
    }

    /// Track at a play-order position
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.play_order
            .get(index)
            .and_then(|&base| self.base_order.get(base))
    }

    /// All tracks in play order (the list the caller sees)
    pub fn tracks(&self) -> Vec<&Track> {
        self.play_order
            .iter()
            .map(|&base| &self.base_order[base])
            .collect()
    }

    /// Tracks in original insertion order
    pub fn base_order(&self) -> &[Track] {
        &self.base_order
    }

    /// Visit order as indices into `base_order`
    pub fn play_order(&self) -> &[usize] {
        &self.play_order
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Whether `next()` would land on a different track
    pub fn has_next(&self) -> bool {
        self.len() > 1
    }

    /// Whether `previous()` would land on a different track
    pub fn has_previous(&self) -> bool {
        self.len() > 1 || !self.history.is_empty()
    }

    /// Preview the tracks `count` calls to `next()` would visit
    pub fn up_next(&self, count: usize) -> Vec<&Track> {
        let len = self.len();
        if len == 0 {
            return Vec::new();
        }

        let mut position = self.cursor;
        let mut upcoming = Vec::with_capacity(count);
        for _ in 0..count {
            let step = position.map_or(0, |c| (c + 1) % len);
            upcoming.push(&self.base_order[self.play_order[step]]);
            position = Some(step);
        }
        upcoming
    }

    // ===== Mutations =====

    /// Replace the whole queue
    ///
    /// Hard reset: play order back to identity, shuffle off, history cleared.
    /// `start_index` is clamped into range.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        let len = tracks.len();
        self.base_order = tracks;
        self.play_order = (0..len).collect();
        self.cursor = len.checked_sub(1).map(|last| start_index.min(last));
        self.shuffled = false;
        self.history.clear();
    }

    /// Add a track after the current one or at the tail
    pub fn add(&mut self, track: Track, position: QueuePosition) {
        self.base_order.push(track);
        let base = self.base_order.len() - 1;

        match (self.cursor, position) {
            (Some(cursor), QueuePosition::Next) => self.play_order.insert(cursor + 1, base),
            _ => self.play_order.push(base),
        }

        if self.cursor.is_none() {
            self.cursor = Some(0);
            self.settle_history();
        }
    }

    /// Remove the track at a play-order position
    ///
    /// Returns `None` (and changes nothing) for an out-of-range index.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.play_order.len() {
            return None;
        }

        let base = self.play_order.remove(index);
        let track = self.base_order.remove(base);
        for entry in &mut self.play_order {
            if *entry > base {
                *entry -= 1;
            }
        }

        let len = self.play_order.len();
        self.cursor = match self.cursor {
            _ if len == 0 => None,
            Some(cursor) if index < cursor => Some(cursor - 1),
            // Removed the current track: the next one slid into its slot
            Some(cursor) if index == cursor => Some(if cursor >= len { 0 } else { cursor }),
            other => other,
        };

        if len == 0 {
            self.shuffled = false;
            self.history.clear();
        } else {
            self.settle_history();
        }

        Some(track)
    }

    /// Move a track within play order
    ///
    /// The cursor follows the track it pointed at. Returns `false` (and
    /// changes nothing) if either index is out of range.
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        let len = self.play_order.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let moved = self.play_order.remove(from);
        self.play_order.insert(to, moved);

        if let Some(cursor) = self.cursor {
            self.cursor = Some(if cursor == from {
                to
            } else if from < cursor && to >= cursor {
                cursor - 1
            } else if from > cursor && to <= cursor {
                cursor + 1
            } else {
                cursor
            });
        }

        true
    }

    /// Select the track at a play-order position
    ///
    /// The track being left is pushed onto history. All forward navigation
    /// goes through here.
    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        if index >= self.play_order.len() {
            return None;
        }

        if self.cursor != Some(index) {
            if let Some(current) = self.current_track().cloned() {
                self.history.push(current);
            }
            self.cursor = Some(index);
            self.settle_history();
        }

        self.current_track()
    }

    /// Advance one step in play order, wrapping at the end
    ///
    /// Does not look at repeat mode.
    pub fn next(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let target = self.cursor.map_or(0, |c| (c + 1) % len);
        self.jump_to(target)
    }

    /// Go back to the most recently left track
    ///
    /// History entries are resolved by identity against the current play
    /// order; entries whose track has since been removed are skipped. With
    /// no usable history, steps back one position (wrapping) without
    /// recording anything.
    pub fn previous(&mut self) -> Option<&Track> {
        if self.is_empty() {
            return None;
        }

        while let Some(entry) = self.history.pop() {
            if let Some(position) = self.position_of(&entry) {
                self.cursor = Some(position);
                self.settle_history();
                return self.current_track();
            }
            if self.current_track().is_some_and(|c| c.same_as(&entry)) {
                tracing::debug!(track_id = %entry.id, "Skipping history entry for the current track");
            } else {
                tracing::debug!(track_id = %entry.id, "Skipping history entry no longer in queue");
            }
        }

        let len = self.len();
        self.cursor = Some(self.cursor.map_or(0, |c| (c + len - 1) % len));
        self.current_track()
    }

    /// Shuffle with the thread-local RNG
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Shuffle upcoming tracks, keeping the current track current
    ///
    /// The current track moves to play-order position 0 and everything else
    /// is permuted behind it.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let anchor = self.cursor.map(|c| self.play_order[c]);
        self.play_order = anchored_permutation(self.base_order.len(), anchor, rng);
        if anchor.is_some() {
            self.cursor = Some(0);
        }
        self.shuffled = true;
    }

    /// Restore insertion order, keeping the current track current
    pub fn unshuffle(&mut self) {
        let current = self.cursor.map(|c| self.play_order[c]);
        self.play_order = (0..self.base_order.len()).collect();
        // Identity order: base index == play-order position
        self.cursor = current;
        self.shuffled = false;
    }

    /// Reset to an empty queue, keeping the repeat mode
    pub fn clear(&mut self) {
        self.base_order.clear();
        self.play_order.clear();
        self.cursor = None;
        self.shuffled = false;
        self.history.clear();
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// React to the media sink finishing the current track naturally
    ///
    /// - `One`: stay on the current track
    /// - `All`: `next()`, wrapping at the end
    /// - `None`: `next()`, or stop (`None`, nothing changed) after the last track
    pub fn track_ended(&mut self) -> Option<&Track> {
        let cursor = self.cursor?;
        match self.repeat_mode {
            RepeatMode::One => self.current_track(),
            RepeatMode::All => self.next(),
            RepeatMode::None if cursor + 1 < self.len() => self.next(),
            RepeatMode::None => None,
        }
    }

    // ===== Internal =====

    /// Play-order position of `track`, preferring one that is not the cursor
    fn position_of(&self, track: &Track) -> Option<usize> {
        self.play_order
            .iter()
            .enumerate()
            .filter(|&(position, _)| Some(position) != self.cursor)
            .find(|&(_, &base)| self.base_order[base].same_as(track))
            .map(|(position, _)| position)
    }

    fn settle_history(&mut self) {
        if let Some(current) = self.current_track().cloned() {
            self.history.drop_leading(&current);
        }
    }
}

impl Default for QueueState {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_HISTORY_SIZE)
    }
}
