//! NekoTV - Synchronized Playback Engine
//!
//! Platform-agnostic core of a watch-together video player.
//!
//! This crate provides:
//! - Playlist with server-mirrored ordering semantics (insert-after-current,
//!   set-next, skip-or-drop, wholesale snapshots)
//! - Backend adapters over heterogeneous video sources (iframe embeds,
//!   YouTube IFrame API, Twitch embed, raw media elements), each with its
//!   own readiness lifecycle
//! - A playback manager that keeps exactly one backend attached and exposes
//!   a uniform play/pause/seek/rate/mute facade
//! - Autoplay-restriction handling (verify, retry once, then prompt)
//!
//! # Architecture
//!
//! `nekotv-playback` never touches the page. Everything the engine does to
//! the outside world goes through two traits the embedder implements:
//! [`VideoSurface`] (the mount point player widgets attach to) and
//! [`NotificationSink`] (the one user-facing prompt). Asynchronous backend
//! bootstrap is reported back through `on_script_ready` / `on_player_ready`,
//! and a periodic `tick()` drives the autoplay watchdog. Everything runs on
//! the embedder's single thread.
//!
//! # Example: Playlist Semantics
//!
//! ```rust
//! use nekotv_playback::{Playlist, VideoItem, VideoKind};
//! use std::time::Duration;
//!
//! let mut playlist = Playlist::new();
//! let item = VideoItem {
//!     id: "dQw4w9WgXcQ".to_string(),
//!     url: "https://youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!     kind: VideoKind::YouTube,
//!     title: "A Video".to_string(),
//!     author: "Someone".to_string(),
//!     duration: Some(Duration::from_secs(212)),
//!     is_temporary: false,
//! };
//!
//! playlist.add_item(item.clone(), true);
//! assert_eq!(playlist.current_item().unwrap().url, item.url);
//!
//! // Skipping past the last item wraps to the front
//! playlist.skip_current();
//! assert_eq!(playlist.position(), 0);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use nekotv_playback::{
//!     NotificationSink, PlaybackConfig, PlaybackManager, Result, VideoItem,
//!     VideoKind, VideoSurface,
//! };
//! use std::time::Duration;
//!
//! // Implement the surface for your platform (DOM bindings, test fake, ...)
//! struct MySurface;
//!
//! impl VideoSurface for MySurface {
//!     fn inject_script(&mut self, _kind: VideoKind) -> Result<()> { Ok(()) }
//!     fn attach_player(&mut self, _kind: VideoKind, _item: &VideoItem) -> Result<()> { Ok(()) }
//!     fn detach_player(&mut self, _kind: VideoKind) {}
//!     fn load_media(&mut self, _kind: VideoKind, _item: &VideoItem) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn is_playing(&self) -> bool { false }
//!     fn current_time(&self) -> Option<Duration> { None }
//!     fn seek(&mut self, _position: Duration) {}
//!     fn playback_rate(&self) -> f64 { 1.0 }
//!     fn set_playback_rate(&mut self, _rate: f64) {}
//!     fn set_muted(&mut self, _muted: bool) {}
//!     fn set_volume(&mut self, _level: u8) {}
//! }
//!
//! struct MyNotifier;
//!
//! impl NotificationSink for MyNotifier {
//!     fn autoplay_blocked(&mut self, message: &str) {
//!         println!("{message}");
//!     }
//! }
//!
//! let mut manager = PlaybackManager::new(
//!     &PlaybackConfig::default(),
//!     Box::new(MySurface),
//!     Box::new(MyNotifier),
//! );
//!
//! // Feed playlist state in, forward readiness callbacks as the embedder
//! // reports them, and poll the autoplay watchdog from the event loop:
//! // manager.set_items(items, Some(0));
//! // manager.on_script_ready(VideoKind::YouTube);
//! // manager.on_player_ready(VideoKind::YouTube);
//! manager.tick();
//! ```

mod autoplay;
mod backend;
mod clock;
mod error;
mod manager;
mod playlist;
mod surface;
mod timestamp;
pub mod types;
mod volume;

// Public exports
pub use autoplay::{AutoplayVerdict, AutoplayWatchdog};
pub use backend::{
    extract_channel, extract_video_id, BackendTable, EmbedStage, IframeBackend, RawBackend,
    TwitchBackend, VideoBackend, YouTubeBackend,
};
pub use clock::{Clock, SystemClock, TimeAnchor};
pub use error::{PlaybackError, Result};
pub use manager::{PlaybackManager, PlaybackState, AUTOPLAY_PROMPT};
pub use playlist::Playlist;
pub use surface::{NotificationSink, VideoSurface};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use types::{PlaybackConfig, VideoItem, VideoKind};
pub use volume::Volume;
