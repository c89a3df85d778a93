//! Synchronization reconciler
//!
//! Applies server timeline events to the playback manager with
//! threshold-gated corrections: when the local playhead is already close to
//! the server's, the event is ignored as noise instead of producing visible
//! judder. The gating also absorbs the server echo of one's own actions, so
//! no origin tagging is needed.

use crate::events::{ServerEvent, TimeSync};
use nekotv_playback::PlaybackManager;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reconciliation tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Corrections smaller than this are ignored as noise (default: 1600 ms)
    pub sync_threshold: Duration,

    /// Forward nudge compensating the server-to-client delay when a
    /// correction lands on a playing timeline (default: 500 ms)
    pub seek_nudge: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_threshold: Duration::from_millis(1600),
            seek_nudge: Duration::from_millis(500),
        }
    }
}

/// Applies server timeline events to a [`PlaybackManager`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    config: SyncConfig,
}

impl Reconciler {
    /// Create a reconciler with the given tunables
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Current tunables
    pub fn config(&self) -> SyncConfig {
        self.config
    }

    /// Apply one decoded server event
    pub fn apply(&self, player: &mut PlaybackManager, event: &ServerEvent) {
        match event {
            ServerEvent::Connected {
                items,
                position,
                time,
            } => {
                player.set_items(items.clone(), Some(*position));
                self.apply_set_time(player, time.time);
            }
            ServerEvent::AddVideo { item, at_end } => {
                player.add_video_item(item.clone(), *at_end);
            }
            ServerEvent::RemoveVideo { url } => {
                player.remove_item(url);
                if player.is_empty() {
                    player.stop();
                }
            }
            ServerEvent::SkipVideo { url } => {
                player.skip_item(url);
                if player.is_empty() {
                    player.stop();
                }
            }
            ServerEvent::Pause { time } => {
                // Pausing is the authoritative freeze moment: no threshold
                player.set_time(*time);
                player.pause();
            }
            ServerEvent::Play { time } => self.apply_play(player, *time),
            ServerEvent::GetTime(sync) => self.apply_get_time(player, sync),
            ServerEvent::SetTime { time } => self.apply_set_time(player, *time),
            ServerEvent::SetRate { rate } => {
                player.set_playback_rate(*rate);
            }
            ServerEvent::Rewind { time } => {
                // Always an explicit authoritative instruction: no threshold
                player.set_time(*time + self.config.seek_nudge);
            }
            ServerEvent::PlayItem { position } => {
                player.set_video(*position);
            }
            ServerEvent::SetNextItem { position } => {
                player.set_next_item(*position);
            }
            ServerEvent::UpdatePlaylist { items } => {
                player.set_items(items.clone(), None);
            }
            ServerEvent::TogglePlaylistLock { open } => {
                player.set_playlist_open(*open);
            }
            ServerEvent::ClearPlaylist => {
                player.clear_items();
                player.stop();
            }
        }
    }

    fn apply_play(&self, player: &mut PlaybackManager, server_time: Duration) {
        let local = player.time();
        if drift(local, server_time) >= self.config.sync_threshold {
            player.set_time(server_time + self.config.seek_nudge);
        }
        player.play();
    }

    fn apply_set_time(&self, player: &mut PlaybackManager, server_time: Duration) {
        let local = player.time();
        if drift(local, server_time) < self.config.sync_threshold {
            return;
        }
        player.set_time(server_time);
    }

    fn apply_get_time(&self, player: &mut PlaybackManager, sync: &TimeSync) {
        let paused = sync.paused.unwrap_or(false);
        let rate = sync.rate.unwrap_or(1.0);

        if player.playback_rate() != rate {
            player.set_playback_rate(rate);
        }

        let local = player.time();

        // Close to the end of the item the backends get quirky; leave them
        // alone and let the server's skip event settle it.
        if let Some(duration) = player.duration() {
            if duration.saturating_sub(local) <= self.config.sync_threshold {
                tracing::debug!("near end of item, skipping reconciliation");
                return;
            }
        }

        if paused {
            player.pause();
        } else {
            player.play();
        }

        if drift(local, sync.time) < self.config.sync_threshold {
            return;
        }
        if paused {
            player.set_time(sync.time);
        } else {
            player.set_time(sync.time + self.config.seek_nudge);
        }
    }
}

/// Absolute difference of two playheads
fn drift(a: Duration, b: Duration) -> Duration {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_1600_ms() {
        let config = SyncConfig::default();
        assert_eq!(config.sync_threshold, Duration::from_millis(1600));
        assert_eq!(config.seek_nudge, Duration::from_millis(500));
    }

    #[test]
    fn drift_is_symmetric() {
        let a = Duration::from_secs(10);
        let b = Duration::from_secs(13);
        assert_eq!(drift(a, b), Duration::from_secs(3));
        assert_eq!(drift(b, a), Duration::from_secs(3));
        assert_eq!(drift(a, a), Duration::ZERO);
    }
}
