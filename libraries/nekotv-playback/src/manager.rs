//! Playback manager - core orchestration
//!
//! Owns the playlist and the backend adapters, keeps exactly one adapter
//! attached to the playback surface at a time, and exposes a uniform
//! play/pause/seek/rate facade that is independent of which backend is
//! active. Commands issued while the active backend is not ready are
//! dropped, not queued: a later readiness callback never replays them.

use crate::autoplay::{AutoplayVerdict, AutoplayWatchdog};
use crate::backend::{BackendTable, EmbedStage, VideoBackend};
use crate::clock::{Clock, SystemClock};
use crate::playlist::Playlist;
use crate::surface::{NotificationSink, VideoSurface};
use crate::types::{PlaybackConfig, VideoItem, VideoKind};
use crate::volume::Volume;
use std::rc::Rc;
use std::time::Duration;

/// Prompt text handed to the notification collaborator when autoplay stays
/// blocked after the retry
pub const AUTOPLAY_PROMPT: &str =
    "Click here to resume synchronized playback (your browser requires a click before videos can play)";

/// Snapshot of the manager's playback bookkeeping
///
/// Mutated only by the manager; the reconciler and UI read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Kind of the adapter currently holding the playback surface
    pub active_backend: Option<VideoKind>,

    /// Lifecycle stage reported by the active adapter
    pub readiness: EmbedStage,

    /// Local playhead as of the last `time()` query
    pub last_known_local_time: Duration,

    /// Last position handed to the active adapter via `set_time`
    pub last_applied_server_time: Option<Duration>,
}

/// Playback controller
///
/// Owns the [`Playlist`] and the active backend selection exclusively;
/// collaborators mutate playback only through this type's operations.
pub struct PlaybackManager {
    playlist: Playlist,
    backends: BackendTable,
    active: Option<VideoKind>,
    surface: Box<dyn VideoSurface>,
    notifier: Box<dyn NotificationSink>,
    clock: Rc<dyn Clock>,
    volume: Volume,
    watchdog: AutoplayWatchdog,
    state: PlaybackState,
}

impl PlaybackManager {
    /// Create a manager driving the given surface, using the system clock
    pub fn new(
        config: &PlaybackConfig,
        surface: Box<dyn VideoSurface>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self::with_clock(config, surface, notifier, Rc::new(SystemClock))
    }

    /// Create a manager with an injected clock (tests, embedders with their
    /// own time source)
    pub fn with_clock(
        config: &PlaybackConfig,
        surface: Box<dyn VideoSurface>,
        notifier: Box<dyn NotificationSink>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            playlist: Playlist::new(),
            backends: BackendTable::new(),
            active: None,
            surface,
            notifier,
            clock,
            volume: Volume::new(config.volume, config.muted),
            watchdog: AutoplayWatchdog::new(config.autoplay_check, config.autoplay_recheck),
            state: PlaybackState::default(),
        }
    }

    // ===== Playlist Operations =====

    /// Replace the playlist wholesale
    ///
    /// Only triggers a backend switch when the resulting current item
    /// actually differs from the previous one (by URL) or nothing is
    /// active yet; redundant snapshots never reload a playing video.
    pub fn set_items(&mut self, items: Vec<VideoItem>, position: Option<usize>) {
        let previous = self.current_url();
        self.playlist.set_items(items);
        if let Some(pos) = position {
            self.playlist.set_position(pos);
        }
        self.refresh_after_mutation(previous.as_deref());
    }

    /// Activate the item at `index`
    ///
    /// Resolves the adapter for the item's kind, unloading the previously
    /// active adapter first if it differs, then loads the item. At most one
    /// adapter holds a live playback surface at any time.
    pub fn set_video(&mut self, index: usize) {
        self.playlist.set_position(index);
        let Some(item) = self.playlist.current_item().cloned() else {
            return;
        };
        self.activate(&item);
    }

    /// Queue an item (append, or insert after the current position)
    pub fn add_video_item(&mut self, item: VideoItem, at_end: bool) {
        let previous = self.current_url();
        self.playlist.add_item(item, at_end);
        self.refresh_after_mutation(previous.as_deref());
    }

    /// Remove the item with the given URL; unknown URLs are ignored
    pub fn remove_item(&mut self, url: &str) {
        let Some(index) = self.playlist.find_index(|i| i.url == url) else {
            return;
        };
        let previous = self.current_url();
        self.playlist.remove_item(index);
        self.refresh_after_mutation(previous.as_deref());
    }

    /// Skip past the item with the given URL (dropping it if temporary);
    /// unknown URLs are ignored
    pub fn skip_item(&mut self, url: &str) {
        let Some(index) = self.playlist.find_index(|i| i.url == url) else {
            return;
        };
        let previous = self.current_url();
        self.playlist.set_position(index);
        self.playlist.skip_current();
        self.refresh_after_mutation(previous.as_deref());
    }

    /// Move the item at `index` to play right after the current one
    pub fn set_next_item(&mut self, index: usize) {
        let previous = self.current_url();
        self.playlist.set_next_item(index);
        self.refresh_after_mutation(previous.as_deref());
    }

    /// Empty the playlist (playback is stopped separately)
    pub fn clear_items(&mut self) {
        self.playlist.clear();
    }

    /// Set the playlist lock flag
    pub fn set_playlist_open(&mut self, open: bool) {
        self.playlist.set_open(open);
    }

    // ===== Playback Control =====

    /// Start or resume playback; dropped if the active backend is not ready
    pub fn play(&mut self) {
        let Some(kind) = self.active else { return };
        if !self.backends.get(kind).is_ready() {
            tracing::debug!(?kind, "play dropped, backend not ready");
            return;
        }
        self.backends.get_mut(kind).play(self.surface.as_mut());
    }

    /// Pause playback; dropped if the active backend is not ready
    pub fn pause(&mut self) {
        let Some(kind) = self.active else { return };
        if !self.backends.get(kind).is_ready() {
            tracing::debug!(?kind, "pause dropped, backend not ready");
            return;
        }
        self.backends.get_mut(kind).pause(self.surface.as_mut());
    }

    /// Unload the active adapter and release the playback surface
    ///
    /// Distinct from pausing: nothing remains attached afterwards.
    pub fn stop(&mut self) {
        if let Some(kind) = self.active.take() {
            self.backends.get_mut(kind).unload(self.surface.as_mut());
        }
        self.watchdog.disarm();
        self.state.active_backend = None;
        self.state.readiness = EmbedStage::Uninitialized;
    }

    /// Unload and reload the current item on the same adapter
    ///
    /// Used when the surrounding layout changes and the playback surface
    /// has to be re-mounted.
    pub fn reload(&mut self) {
        let Some(kind) = self.active else { return };
        let Some(item) = self.playlist.current_item().cloned() else {
            return;
        };
        self.watchdog.disarm();
        {
            let backend = self.backends.get_mut(kind);
            backend.unload(self.surface.as_mut());
            backend.load(self.surface.as_mut(), &item);
        }
        self.state.readiness = self.backends.get(kind).stage();
        if self.backends.get(kind).is_ready() {
            self.after_attach(kind);
        }
    }

    // ===== Time & Rate =====

    /// Local playhead; 0 while the active backend is not ready
    pub fn time(&mut self) -> Duration {
        let Some(kind) = self.active else {
            return Duration::ZERO;
        };
        let backend = self.backends.get(kind);
        if !backend.is_ready() {
            return Duration::ZERO;
        }
        let t = backend.time(self.surface.as_ref(), self.clock.now());
        self.state.last_known_local_time = t;
        t
    }

    /// Seek; dropped if the active backend is not ready
    pub fn set_time(&mut self, position: Duration) {
        let Some(kind) = self.active else { return };
        if !self.backends.get(kind).is_ready() {
            tracing::debug!(?kind, "seek dropped, backend not ready");
            return;
        }
        let now = self.clock.now();
        self.backends
            .get_mut(kind)
            .set_time(self.surface.as_mut(), now, position);
        self.state.last_applied_server_time = Some(position);
    }

    /// Playback rate; 1 while the active backend is not ready
    pub fn playback_rate(&self) -> f64 {
        let Some(kind) = self.active else { return 1.0 };
        let backend = self.backends.get(kind);
        if !backend.is_ready() {
            return 1.0;
        }
        backend.playback_rate(self.surface.as_ref())
    }

    /// Change the playback rate; dropped if the active backend is not ready
    pub fn set_playback_rate(&mut self, rate: f64) {
        let Some(kind) = self.active else { return };
        if !self.backends.get(kind).is_ready() {
            return;
        }
        self.backends
            .get_mut(kind)
            .set_playback_rate(self.surface.as_mut(), rate);
    }

    // ===== Volume =====

    /// Set the volume (0-100) and push it to the active backend
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        if let Some(kind) = self.active {
            self.backends
                .get_mut(kind)
                .set_volume(self.surface.as_mut(), level);
        }
    }

    /// Current volume (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Mute or unmute, pushing the state to the active backend
    pub fn set_muted(&mut self, muted: bool) {
        if muted {
            self.volume.mute();
        } else {
            self.volume.unmute();
        }
        if let Some(kind) = self.active {
            self.backends
                .get_mut(kind)
                .set_muted(self.surface.as_mut(), muted);
        }
    }

    /// Toggle the mute flag
    pub fn toggle_muted(&mut self) {
        let muted = !self.volume.is_muted();
        self.set_muted(muted);
    }

    /// Whether muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Queries =====

    /// Whether the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Number of queued items
    pub fn item_count(&self) -> usize {
        self.playlist.len()
    }

    /// Current playlist position
    pub fn current_position(&self) -> usize {
        self.playlist.position()
    }

    /// Current playlist item
    pub fn current_item(&self) -> Option<&VideoItem> {
        self.playlist.current_item()
    }

    /// Duration of the current item; `None` when empty or live
    pub fn duration(&self) -> Option<Duration> {
        self.playlist.current_item().and_then(|i| i.duration)
    }

    /// Whether the active backend is ready to take commands
    pub fn is_video_loaded(&self) -> bool {
        self.active
            .is_some_and(|kind| self.backends.get(kind).is_ready())
    }

    /// Read access to the playlist (for UI rendering)
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Playback bookkeeping snapshot
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    // ===== Readiness & Timer Callbacks =====

    /// The embedder finished loading a backend's bootstrap script
    pub fn on_script_ready(&mut self, kind: VideoKind) {
        self.backends
            .get_mut(kind)
            .on_script_ready(self.surface.as_mut());
        self.refresh_readiness();
    }

    /// The embedder reports a player widget ready
    pub fn on_player_ready(&mut self, kind: VideoKind) {
        self.backends
            .get_mut(kind)
            .on_player_ready(self.surface.as_mut());
        if self.active == Some(kind) && self.backends.get(kind).is_ready() {
            self.after_attach(kind);
        }
        self.refresh_readiness();
    }

    /// Periodic driver for the autoplay watchdog
    ///
    /// The embedder calls this from its event loop (roughly once a second
    /// is plenty).
    pub fn tick(&mut self) {
        let Some(kind) = self.active else { return };
        let now = self.clock.now();
        let playing = self.surface.is_playing();
        match self.watchdog.poll(now, playing) {
            AutoplayVerdict::Idle => {}
            AutoplayVerdict::Retry => {
                tracing::debug!(?kind, "autoplay verification failed, retrying");
                self.backends.get_mut(kind).play(self.surface.as_mut());
            }
            AutoplayVerdict::Escalate => {
                tracing::warn!(?kind, "autoplay blocked, requesting user gesture");
                self.notifier.autoplay_blocked(AUTOPLAY_PROMPT);
            }
        }
    }

    /// Resume playback from a user gesture (wired to the autoplay prompt)
    pub fn resume_playback(&mut self) {
        let Some(kind) = self.active else { return };
        self.watchdog.disarm();
        self.backends.get_mut(kind).play(self.surface.as_mut());
    }

    // ===== Internal =====

    fn current_url(&self) -> Option<String> {
        self.playlist.current_item().map(|i| i.url.clone())
    }

    /// Re-derive whether the playlist mutation changed what should be
    /// playing, using the identity-comparison rule: reload only when the
    /// current item's URL changed or nothing is active.
    fn refresh_after_mutation(&mut self, previous_url: Option<&str>) {
        let (current_url, position) = match self.playlist.current_item() {
            Some(item) => (item.url.clone(), self.playlist.position()),
            // Empty list: callers decide whether to stop
            None => return,
        };
        let undisturbed = self.active.is_some() && previous_url == Some(current_url.as_str());
        if !undisturbed {
            self.set_video(position);
        }
    }

    fn activate(&mut self, item: &VideoItem) {
        let kind = item.kind;
        if self.active != Some(kind) {
            if let Some(previous) = self.active {
                tracing::debug!(from = ?previous, to = ?kind, "switching backend");
                self.backends
                    .get_mut(previous)
                    .unload(self.surface.as_mut());
            }
            self.active = Some(kind);
        }
        self.watchdog.disarm();
        self.backends
            .get_mut(kind)
            .load(self.surface.as_mut(), item);
        self.state.active_backend = Some(kind);
        self.state.readiness = self.backends.get(kind).stage();
        if self.backends.get(kind).is_ready() {
            self.after_attach(kind);
        }
    }

    /// Post-attach sequence: apply volume state, start playback, arm the
    /// autoplay watchdog
    fn after_attach(&mut self, kind: VideoKind) {
        let muted = self.volume.is_muted();
        let level = self.volume.level();
        {
            let backend = self.backends.get_mut(kind);
            backend.set_muted(self.surface.as_mut(), muted);
            backend.set_volume(self.surface.as_mut(), level);
            backend.play(self.surface.as_mut());
        }
        if self.backends.get(kind).has_playback_control() {
            self.watchdog.arm(self.clock.now());
        }
        self.refresh_readiness();
    }

    fn refresh_readiness(&mut self) {
        if let Some(kind) = self.active {
            self.state.readiness = self.backends.get(kind).stage();
        }
    }
}
