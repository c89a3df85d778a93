//! Backend adapters
//!
//! One adapter per external video source. The playback manager talks to
//! whichever adapter matches the current item's [`VideoKind`] tag, never to
//! an adapter picked by instance identity, and every adapter exposes the
//! same capability set regardless of what the underlying source actually
//! supports. Capabilities the source lacks degrade to defined defaults
//! (rate 1, time 0) instead of errors.
//!
//! Adapters own lifecycle state only; every effect on the page goes through
//! the [`VideoSurface`] handle passed in per call.

mod iframe;
mod raw;
mod twitch;
mod youtube;

pub use iframe::IframeBackend;
pub use raw::RawBackend;
pub use twitch::{extract_channel, TwitchBackend};
pub use youtube::{extract_video_id, YouTubeBackend};

use crate::surface::VideoSurface;
use crate::types::{VideoItem, VideoKind};
use std::time::{Duration, Instant};

/// Lifecycle stage of a backend's playback surface
///
/// API-scripted backends (YouTube, Twitch) walk the full sequence; the
/// others only ever report `Uninitialized`, `ScriptLoading` (acquiring) or
/// `PlayerAttached`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedStage {
    /// Nothing loaded yet
    #[default]
    Uninitialized,

    /// Bootstrap script requested, not yet ready
    ScriptLoading,

    /// Script warm; no player widget attached
    ScriptLoaded,

    /// Player widget constructed and accepting commands
    PlayerAttached,
}

/// Uniform capability set over one external video source
pub trait VideoBackend {
    /// The kind tag this adapter serves
    fn kind(&self) -> VideoKind;

    /// Whether this backend recognizes `url`. Auto-detection only; items
    /// normally arrive with an explicit kind from the server.
    fn can_handle(&self, url: &str) -> bool;

    /// Begin acquiring a playback surface for `item`
    ///
    /// Safe to call while a previous load is still pending: the latest item
    /// supersedes any queued one, and the abandoned load is discarded, not
    /// leaked.
    fn load(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem);

    /// Current lifecycle stage
    fn stage(&self) -> EmbedStage;

    /// True once play/pause/seek commands will be honored
    fn is_ready(&self) -> bool {
        self.stage() == EmbedStage::PlayerAttached
    }

    /// Whether the source can be started programmatically at all.
    /// Scriptless embeds cannot, so there is nothing to verify after an
    /// automatic play attempt.
    fn has_playback_control(&self) -> bool {
        true
    }

    /// No-op unless ready
    fn play(&mut self, surface: &mut dyn VideoSurface);

    /// No-op unless ready
    fn pause(&mut self, surface: &mut dyn VideoSurface);

    /// Current playhead; synthesized from the wall clock where the source
    /// has no native clock
    fn time(&self, surface: &dyn VideoSurface, now: Instant) -> Duration;

    /// Move the playhead
    fn set_time(&mut self, surface: &mut dyn VideoSurface, now: Instant, position: Duration);

    /// Backends without rate control report 1.0
    fn playback_rate(&self, surface: &dyn VideoSurface) -> f64;

    /// Backends without rate control silently ignore this
    fn set_playback_rate(&mut self, surface: &mut dyn VideoSurface, rate: f64);

    fn set_muted(&mut self, surface: &mut dyn VideoSurface, muted: bool);

    /// Volume 0-100; ignored where the source offers no control channel
    fn set_volume(&mut self, surface: &mut dyn VideoSurface, level: u8);

    /// Tear down the playback surface
    ///
    /// Safe from any stage and repeatedly. Scripted backends keep their
    /// bootstrap script warm for reuse.
    fn unload(&mut self, surface: &mut dyn VideoSurface);

    /// The bootstrap script finished loading (scripted backends only)
    fn on_script_ready(&mut self, surface: &mut dyn VideoSurface);

    /// The player widget reported ready
    fn on_player_ready(&mut self, surface: &mut dyn VideoSurface);
}

/// All four adapters, keyed by kind
///
/// Constructed once with the playback manager; lookups go through the
/// [`VideoKind`] tag so the interface contract is enforced uniformly.
#[derive(Default)]
pub struct BackendTable {
    iframe: IframeBackend,
    youtube: YouTubeBackend,
    twitch: TwitchBackend,
    raw: RawBackend,
}

impl BackendTable {
    /// Create the table with all adapters uninitialized
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter for `kind`
    pub fn get(&self, kind: VideoKind) -> &dyn VideoBackend {
        match kind {
            VideoKind::Iframe => &self.iframe,
            VideoKind::YouTube => &self.youtube,
            VideoKind::Twitch => &self.twitch,
            VideoKind::Raw => &self.raw,
        }
    }

    /// Mutable adapter for `kind`
    pub fn get_mut(&mut self, kind: VideoKind) -> &mut dyn VideoBackend {
        match kind {
            VideoKind::Iframe => &mut self.iframe,
            VideoKind::YouTube => &mut self.youtube,
            VideoKind::Twitch => &mut self.twitch,
            VideoKind::Raw => &mut self.raw,
        }
    }

    /// First kind whose adapter recognizes the URL
    pub fn detect(&self, url: &str) -> Option<VideoKind> {
        VideoKind::ALL
            .into_iter()
            .find(|&kind| self.get(kind).can_handle(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_recognizes_youtube_and_twitch() {
        let table = BackendTable::new();
        assert_eq!(
            table.detect("https://youtube.com/watch?v=abc123"),
            Some(VideoKind::YouTube)
        );
        assert_eq!(
            table.detect("https://www.twitch.tv/somestreamer"),
            Some(VideoKind::Twitch)
        );
        assert_eq!(table.detect("https://example.com/clip.webm"), None);
    }

    #[test]
    fn table_resolves_every_kind() {
        let table = BackendTable::new();
        for kind in VideoKind::ALL {
            assert_eq!(table.get(kind).kind(), kind);
        }
    }
}
