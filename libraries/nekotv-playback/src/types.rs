//! Core types for the playback engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which external source plays an item.
///
/// Every playlist entry carries its kind; the playback manager resolves the
/// backend adapter from this tag alone, never from adapter identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoKind {
    /// Plain embedded iframe with no script API (also used for embed pages
    /// such as TikTok that offer no playback control)
    Iframe,

    /// YouTube IFrame API player
    YouTube,

    /// Twitch embed player
    Twitch,

    /// Raw media file in a native video element
    Raw,
}

impl VideoKind {
    /// All kinds, in auto-detection order.
    pub const ALL: [VideoKind; 4] = [
        VideoKind::YouTube,
        VideoKind::Twitch,
        VideoKind::Raw,
        VideoKind::Iframe,
    ];
}

/// One playlist entry.
///
/// Title and author are display metadata owned by the UI layer; they are
/// carried through the engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    /// Backend-specific identifier (video id, embed URL, ...)
    pub id: String,

    /// Source URL; playlist identity and backend detection key on it
    pub url: String,

    /// Which backend adapter handles this item
    pub kind: VideoKind,

    /// Display title
    pub title: String,

    /// Display author/uploader
    pub author: String,

    /// Total duration; `None` for live streams
    pub duration: Option<Duration>,

    /// Removed once finished playing instead of being advanced past
    pub is_temporary: bool,
}

/// Configuration for the playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Start muted (default: false)
    pub muted: bool,

    /// How long to wait after an automatic play attempt before verifying
    /// that playback actually started (default: 2s)
    pub autoplay_check: Duration,

    /// How long to wait after the single retry before escalating to a
    /// user-facing prompt (default: 1s)
    pub autoplay_recheck: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            muted: false,
            autoplay_check: Duration::from_secs(2),
            autoplay_recheck: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 80);
        assert!(!config.muted);
        assert_eq!(config.autoplay_check, Duration::from_secs(2));
        assert_eq!(config.autoplay_recheck, Duration::from_secs(1));
    }

    #[test]
    fn video_item_creation() {
        let item = VideoItem {
            id: "dQw4w9WgXcQ".to_string(),
            url: "https://youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            kind: VideoKind::YouTube,
            title: "Test Video".to_string(),
            author: "Test Channel".to_string(),
            duration: Some(Duration::from_secs(212)),
            is_temporary: false,
        };

        assert_eq!(item.kind, VideoKind::YouTube);
        assert!(!item.is_temporary);
    }

    #[test]
    fn live_stream_has_no_duration() {
        let item = VideoItem {
            id: "somestreamer".to_string(),
            url: "https://twitch.tv/somestreamer".to_string(),
            kind: VideoKind::Twitch,
            title: "Live".to_string(),
            author: "somestreamer".to_string(),
            duration: None,
            is_temporary: true,
        };

        assert!(item.duration.is_none());
    }
}
