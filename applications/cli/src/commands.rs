//! Queue commands
//!
//! One subcommand per public queue operation. Each run applies a single
//! operation to the manager and renders the result as text lines.

use crate::error::{CliError, Result};
use cadence_queue::{QueueEvent, QueueManager, QueuePosition, RepeatMode, StateStore, Track};
use clap::{Subcommand, ValueEnum};
use std::str::FromStr;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the queue
    Show {
        /// Also preview this many upcoming tracks
        #[arg(long, default_value_t = 0)]
        up_next: usize,
    },
    /// Replace the queue (tracks as id[:seconds[:title[:artist]]])
    Set {
        #[arg(required = true)]
        tracks: Vec<TrackArg>,
        /// Position to start at (clamped)
        #[arg(short, long, default_value_t = 0)]
        start: usize,
    },
    /// Add a track to the queue
    Add {
        track: TrackArg,
        /// Play right after the current track instead of at the end
        #[arg(long)]
        next: bool,
    },
    /// Remove the track at a queue position
    Remove { index: usize },
    /// Move a track from one queue position to another
    Move { from: usize, to: usize },
    /// Select the track at a queue position
    Jump { index: usize },
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Prev,
    /// Shuffle upcoming tracks
    Shuffle,
    /// Restore original order
    Unshuffle,
    /// Toggle shuffle
    ToggleShuffle,
    /// Set repeat mode
    Repeat { mode: RepeatArg },
    /// Report that the current track finished playing
    Ended,
    /// Empty the queue
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    None,
    One,
    All,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::None => RepeatMode::None,
            RepeatArg::One => RepeatMode::One,
            RepeatArg::All => RepeatMode::All,
        }
    }
}

/// Track given on the command line as `id[:seconds[:title[:artist]]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackArg(pub Track);

impl FromStr for TrackArg {
    type Err = CliError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| CliError::InvalidTrack {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = input.splitn(4, ':');
        let id = parts.next().unwrap_or_default().trim();
        if id.is_empty() {
            return Err(invalid("missing id"));
        }

        let seconds = match parts.next() {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid("duration must be whole seconds"))?,
            None => 0,
        };

        let title = parts.next().unwrap_or_default();
        let artist = parts.next().unwrap_or_default();
        Ok(Self(Track::new(id, seconds).with_metadata(title, artist)))
    }
}

/// Apply one command, returning the lines to print
pub fn run<S: StateStore>(manager: &mut QueueManager<S>, command: &Command) -> Vec<String> {
    let mut out = Vec::new();
    // Track to restart when the current one did not change (repeat one)
    let mut replay = None;

    match command {
        Command::Show { up_next } => {
            out.extend(render_queue(manager));
            if *up_next > 0 {
                out.push("up next:".to_string());
                out.extend(
                    manager
                        .up_next(*up_next)
                        .iter()
                        .map(|t| format!("  {}", describe(t))),
                );
            }
            return out;
        }
        Command::Set { tracks, start } => {
            let tracks = tracks.iter().map(|arg| arg.0.clone()).collect();
            manager.set_queue(tracks, *start);
        }
        Command::Add { track, next } => {
            let position = if *next {
                QueuePosition::Next
            } else {
                QueuePosition::End
            };
            manager.add_to_queue(track.0.clone(), position);
        }
        Command::Remove { index } => {
            if manager.remove_from_queue(*index).is_none() {
                out.push(format!("no track at position {}", index));
            }
        }
        Command::Move { from, to } => {
            if !manager.move_in_queue(*from, *to) {
                out.push(format!("cannot move {} -> {}", from, to));
            }
        }
        Command::Jump { index } => {
            if manager.jump_to(*index).is_none() {
                out.push(format!("no track at position {}", index));
            }
        }
        Command::Next => {
            manager.next();
        }
        Command::Prev => {
            manager.previous();
        }
        Command::Shuffle => manager.shuffle(),
        Command::Unshuffle => manager.unshuffle(),
        Command::ToggleShuffle => manager.toggle_shuffle(),
        Command::Repeat { mode } => manager.set_repeat_mode((*mode).into()),
        Command::Ended => {
            replay = manager.track_ended().map(|t| t.id.clone());
            if replay.is_none() && !manager.is_empty() {
                out.push("end of queue, stopped".to_string());
            }
        }
        Command::Clear => manager.clear_queue(),
    }

    for event in manager.drain_events() {
        if let QueueEvent::CurrentTrackChanged { track_id, .. } = event {
            replay = None;
            // Stand-in for handing the track to a media sink
            match track_id {
                Some(id) => out.push(format!("now playing: {}", id)),
                None => out.push("stopped: queue is empty".to_string()),
            }
        }
    }
    if let Some(id) = replay {
        out.push(format!("now playing: {}", id));
    }

    out.extend(render_queue(manager));
    out
}

/// Queue listing with the current track marked
pub fn render_queue<S: StateStore>(manager: &QueueManager<S>) -> Vec<String> {
    if manager.is_empty() {
        return vec!["queue is empty".to_string()];
    }

    let current = manager.current_index();
    let mut lines: Vec<String> = manager
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == current { '>' } else { ' ' };
            format!("{} {:>3}  {}", marker, i, describe(track))
        })
        .collect();

    lines.push(format!(
        "shuffle: {}  repeat: {}  history: {}",
        if manager.is_shuffled() { "on" } else { "off" },
        manager.repeat_mode(),
        manager.history().len()
    ));
    lines
}

fn describe(track: &Track) -> String {
    let duration = format!(
        "{}:{:02}",
        track.duration_seconds / 60,
        track.duration_seconds % 60
    );
    match (track.title.is_empty(), track.artist.is_empty()) {
        (true, _) => format!("{} [{}]", track.id, duration),
        (false, true) => format!("{} [{}] {}", track.id, duration, track.title),
        (false, false) => format!(
            "{} [{}] {} - {}",
            track.id, duration, track.title, track.artist
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_track_arg() {
        let arg: TrackArg = "t1:215:Song:Band".parse().unwrap();
        assert_eq!(arg.0, Track::new("t1", 215).with_metadata("Song", "Band"));
    }

    #[test]
    fn parse_id_only() {
        let arg: TrackArg = "t1".parse().unwrap();
        assert_eq!(arg.0, Track::new("t1", 0));
    }

    #[test]
    fn title_may_not_contain_artist_separator() {
        let arg: TrackArg = "t1:60:A:B:C".parse().unwrap();
        assert_eq!(arg.0.title, "A");
        assert_eq!(arg.0.artist, "B:C");
    }

    #[test]
    fn reject_bad_track_args() {
        assert!("".parse::<TrackArg>().is_err());
        assert!(":60".parse::<TrackArg>().is_err());
        assert!("t1:abc".parse::<TrackArg>().is_err());
        assert!("t1:-5".parse::<TrackArg>().is_err());
    }

    #[test]
    fn describe_formats_duration() {
        assert_eq!(describe(&Track::new("x", 65)), "x [1:05]");
        assert_eq!(
            describe(&Track::new("x", 600).with_metadata("T", "")),
            "x [10:00] T"
        );
    }
}
