//! Watch session
//!
//! Ties the reconciler to a playback manager and carries the two pieces of
//! state that outlive a connection: whether the user has the synchronized
//! player enabled, and whether it is muted. Both are read from the
//! preference store at startup and written back on toggle. Enabling
//! subscribes to the server's watch feed; disabling unsubscribes and
//! releases the playback surface.

use crate::events::ServerEvent;
use crate::prefs::{decode_flag, encode_flag, PreferenceStore, PREF_ENABLED, PREF_MUTED};
use crate::reconciler::Reconciler;
use nekotv_playback::PlaybackManager;

/// Outbound signals to the server
///
/// The transport owns the wire encoding; the session only tells it when to
/// enter or leave the watch feed.
pub trait Transport {
    fn send_subscribe(&mut self);
    fn send_unsubscribe(&mut self);
}

/// One user's synchronized-playback session
pub struct WatchSession {
    player: PlaybackManager,
    reconciler: Reconciler,
    transport: Box<dyn Transport>,
    prefs: Box<dyn PreferenceStore>,
    enabled: bool,
}

impl WatchSession {
    /// Create a session, restoring the persisted flags
    ///
    /// If the player was left enabled, the session subscribes immediately.
    pub fn new(
        mut player: PlaybackManager,
        reconciler: Reconciler,
        mut transport: Box<dyn Transport>,
        prefs: Box<dyn PreferenceStore>,
    ) -> Self {
        let enabled = prefs
            .load(PREF_ENABLED)
            .is_some_and(|v| decode_flag(&v));
        let muted = prefs.load(PREF_MUTED).is_some_and(|v| decode_flag(&v));

        player.set_muted(muted);
        if enabled {
            transport.send_subscribe();
        }

        Self {
            player,
            reconciler,
            transport,
            prefs,
            enabled,
        }
    }

    /// Entry point for decoded server events
    pub fn handle_message(&mut self, event: &ServerEvent) {
        self.reconciler.apply(&mut self.player, event);
    }

    /// Whether the synchronized player is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the synchronized player, persisting the flag
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        self.prefs.store(PREF_ENABLED, encode_flag(enabled));
        if enabled {
            self.transport.send_subscribe();
        } else {
            self.transport.send_unsubscribe();
            self.player.stop();
        }
    }

    /// Toggle the enabled flag
    pub fn toggle_enabled(&mut self) {
        self.set_enabled(!self.enabled);
    }

    /// Mute or unmute, persisting the flag
    pub fn set_muted(&mut self, muted: bool) {
        self.player.set_muted(muted);
        self.prefs.store(PREF_MUTED, encode_flag(muted));
    }

    /// Toggle the mute flag
    pub fn toggle_muted(&mut self) {
        let muted = !self.player.is_muted();
        self.set_muted(muted);
    }

    /// The owned playback manager
    pub fn player(&self) -> &PlaybackManager {
        &self.player
    }

    /// Mutable access for readiness callbacks and ticks
    pub fn player_mut(&mut self) -> &mut PlaybackManager {
        &mut self.player
    }
}
