//! Core types for queue management

use serde::{Deserialize, Serialize};

/// Track reference held by the queue
///
/// Tracks are owned by the catalog; the queue only needs an identity and a
/// duration. Title and artist are carried along for display and default to
/// empty when absent from stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track duration in whole seconds
    pub duration_seconds: u32,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,
}

impl Track {
    /// Create a track with only an identity and a duration
    pub fn new(id: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            id: id.into(),
            duration_seconds,
            title: String::new(),
            artist: String::new(),
        }
    }

    /// Attach display metadata
    #[must_use]
    pub fn with_metadata(mut self, title: impl Into<String>, artist: impl Into<String>) -> Self {
        self.title = title.into();
        self.artist = artist.into();
        self
    }

    /// Whether two references point at the same track
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

/// Repeat mode
///
/// Consulted only when the media sink reports a natural end of track,
/// never by `next()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the last track in play order ends
    #[default]
    None,

    /// Loop current track only
    One,

    /// Loop entire queue
    All,
}

impl RepeatMode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "one",
            Self::All => "all",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" | "off" => Some(Self::None),
            "one" => Some(Self::One),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where `add_to_queue` places a new track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueuePosition {
    /// Right after the current track
    Next,

    /// Tail of the play order
    End,
}

/// Default number of tracks kept in navigation history
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Default key the queue state is stored under
pub const DEFAULT_STORAGE_KEY: &str = "cadence.queue.state";

/// Configuration for the queue manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Key the serialized state is stored under (default: "cadence.queue.state")
    pub storage_key: String,

    /// Maximum history size (default: 20)
    pub history_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}
