//! Server timeline events
//!
//! Typed variants of everything the server broadcasts over the watch feed.
//! The transport owns the wire encoding; it hands decoded events to
//! [`crate::Reconciler::apply`].

use nekotv_playback::VideoItem;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The server's belief about the shared playhead
///
/// Broadcast roughly once a second while something is playing, and included
/// in the connect snapshot. `paused` and `rate` are omitted by older servers
/// and default to playing at rate 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSync {
    /// Playhead position
    pub time: Duration,

    /// Whether the shared timeline is paused
    pub paused: Option<bool>,

    /// Shared playback rate
    pub rate: Option<f64>,
}

impl TimeSync {
    /// Playhead at `time`, playing at rate 1
    pub fn playing(time: Duration) -> Self {
        Self {
            time,
            paused: Some(false),
            rate: Some(1.0),
        }
    }
}

/// Decoded timeline events delivered by the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerEvent {
    /// Full state snapshot sent on subscribe
    Connected {
        items: Vec<VideoItem>,
        position: usize,
        time: TimeSync,
    },

    /// An item was queued
    AddVideo { item: VideoItem, at_end: bool },

    /// The item with this URL was removed
    RemoveVideo { url: String },

    /// The item with this URL finished or was voted past
    SkipVideo { url: String },

    /// Authoritative freeze at the given playhead
    Pause { time: Duration },

    /// Resume from the given playhead
    Play { time: Duration },

    /// Periodic playhead heartbeat
    GetTime(TimeSync),

    /// Explicit seek / periodic resync broadcast
    SetTime { time: Duration },

    /// Shared playback rate changed
    SetRate { rate: f64 },

    /// Explicit jump back to the given playhead
    Rewind { time: Duration },

    /// Jump to the item at this playlist position
    PlayItem { position: usize },

    /// Move the item at this position to play next
    SetNextItem { position: usize },

    /// Wholesale playlist replacement
    UpdatePlaylist { items: Vec<VideoItem> },

    /// Playlist lock flag changed
    TogglePlaylistLock { open: bool },

    /// Playlist emptied
    ClearPlaylist,
}
