//! Embedder-facing collaborator traits
//!
//! The engine never touches the page itself. The embedder supplies a
//! [`VideoSurface`] for the rectangular mount point that player widgets
//! attach to, and a [`NotificationSink`] for the one user-facing condition
//! the engine can raise (autoplay blocked).

use crate::error::Result;
use crate::types::{VideoItem, VideoKind};
use std::time::Duration;

/// Playback surface mount point
///
/// Implemented once per embedder. The engine guarantees at most one player
/// widget is attached at any time; the surface only has to service the
/// current one.
///
/// Script injection and widget construction are asynchronous on real
/// embedders: the surface starts the work and the embedder later reports
/// completion through [`crate::PlaybackManager::on_script_ready`] /
/// [`crate::PlaybackManager::on_player_ready`]. Backends that need no
/// asynchronous bootstrap (raw media elements) are considered attached as
/// soon as `attach_player` returns `Ok`.
pub trait VideoSurface {
    /// Start loading the bootstrap script for an API-scripted backend.
    /// Called at most once per kind while the script is cold.
    fn inject_script(&mut self, kind: VideoKind) -> Result<()>;

    /// Construct the player widget for `item` inside the mount point.
    fn attach_player(&mut self, kind: VideoKind, item: &VideoItem) -> Result<()>;

    /// Tear down the player widget. Must be safe to call when nothing is
    /// attached, and repeatedly.
    fn detach_player(&mut self, kind: VideoKind);

    /// Swap the media inside the already-attached player widget.
    fn load_media(&mut self, kind: VideoKind, item: &VideoItem);

    fn play(&mut self);
    fn pause(&mut self);

    /// Whether media is actually progressing. Used to verify that an
    /// automatic play attempt took (autoplay restrictions).
    fn is_playing(&self) -> bool;

    /// Native playhead, if the attached widget has one
    fn current_time(&self) -> Option<Duration>;

    /// Seek the attached widget's native playhead
    fn seek(&mut self, position: Duration);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    fn set_muted(&mut self, muted: bool);

    /// Volume 0-100
    fn set_volume(&mut self, level: u8);
}

/// User-facing notification surface
pub trait NotificationSink {
    /// Playback could not start automatically and needs a user gesture.
    /// The embedder should invoke `PlaybackManager::resume_playback` from
    /// its gesture handler.
    fn autoplay_blocked(&mut self, message: &str);
}
