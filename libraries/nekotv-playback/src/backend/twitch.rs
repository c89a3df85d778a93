//! Twitch embed adapter
//!
//! Same script-bootstrap lifecycle as YouTube, but the embed exposes neither
//! a usable playhead nor rate control: time is synthesized from the wall
//! clock and the rate is pinned at 1.

use super::{EmbedStage, VideoBackend};
use crate::clock::TimeAnchor;
use crate::surface::VideoSurface;
use crate::types::{VideoItem, VideoKind};
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

static CHANNEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?twitch\.tv/(\w+)/?").expect("hardcoded regex")
});

/// Extract the channel name from a twitch.tv URL
pub fn extract_channel(url: &str) -> Option<&str> {
    CHANNEL_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Twitch embed player adapter
#[derive(Default)]
pub struct TwitchBackend {
    stage: EmbedStage,
    pending: Option<VideoItem>,
    attaching: bool,
    anchor: TimeAnchor,
}

impl TwitchBackend {
    fn start_attach(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        match surface.attach_player(VideoKind::Twitch, item) {
            Ok(()) => self.attaching = true,
            Err(e) => tracing::warn!(error = %e, "failed to attach Twitch player"),
        }
    }
}

impl VideoBackend for TwitchBackend {
    fn kind(&self) -> VideoKind {
        VideoKind::Twitch
    }

    fn can_handle(&self, url: &str) -> bool {
        extract_channel(url).is_some()
    }

    fn load(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        match self.stage {
            EmbedStage::Uninitialized => {
                self.pending = Some(item.clone());
                match surface.inject_script(VideoKind::Twitch) {
                    Ok(()) => self.stage = EmbedStage::ScriptLoading,
                    Err(e) => tracing::warn!(error = %e, "failed to inject Twitch script"),
                }
            }
            EmbedStage::ScriptLoading => {
                self.pending = Some(item.clone());
            }
            EmbedStage::ScriptLoaded => {
                if self.attaching {
                    self.pending = Some(item.clone());
                } else {
                    self.start_attach(surface, item);
                }
            }
            EmbedStage::PlayerAttached => {
                surface.load_media(VideoKind::Twitch, item);
            }
        }
    }

    fn stage(&self) -> EmbedStage {
        self.stage
    }

    fn play(&mut self, surface: &mut dyn VideoSurface) {
        if self.is_ready() {
            surface.play();
        }
    }

    fn pause(&mut self, surface: &mut dyn VideoSurface) {
        if self.is_ready() {
            surface.pause();
        }
    }

    fn time(&self, _surface: &dyn VideoSurface, now: Instant) -> Duration {
        self.anchor.get(now)
    }

    fn set_time(&mut self, _surface: &mut dyn VideoSurface, now: Instant, position: Duration) {
        self.anchor.set(now, position);
    }

    fn playback_rate(&self, _surface: &dyn VideoSurface) -> f64 {
        // No rate control on the Twitch embed
        1.0
    }

    fn set_playback_rate(&mut self, _surface: &mut dyn VideoSurface, _rate: f64) {}

    fn set_muted(&mut self, surface: &mut dyn VideoSurface, muted: bool) {
        if self.is_ready() {
            surface.set_muted(muted);
        }
    }

    fn set_volume(&mut self, surface: &mut dyn VideoSurface, level: u8) {
        if self.is_ready() {
            surface.set_volume(level);
        }
    }

    fn unload(&mut self, surface: &mut dyn VideoSurface) {
        self.pending = None;
        self.anchor.reset();
        match self.stage {
            EmbedStage::PlayerAttached => {
                surface.detach_player(VideoKind::Twitch);
                self.stage = EmbedStage::ScriptLoaded;
            }
            EmbedStage::ScriptLoaded if self.attaching => {
                surface.detach_player(VideoKind::Twitch);
            }
            _ => {}
        }
        self.attaching = false;
    }

    fn on_script_ready(&mut self, surface: &mut dyn VideoSurface) {
        if self.stage != EmbedStage::ScriptLoading {
            return;
        }
        self.stage = EmbedStage::ScriptLoaded;
        if let Some(item) = self.pending.take() {
            self.start_attach(surface, &item);
        }
    }

    fn on_player_ready(&mut self, surface: &mut dyn VideoSurface) {
        if !self.attaching {
            return;
        }
        self.attaching = false;
        self.stage = EmbedStage::PlayerAttached;
        if let Some(item) = self.pending.take() {
            surface.load_media(VideoKind::Twitch, &item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_channel_names() {
        assert_eq!(extract_channel("https://www.twitch.tv/somestreamer"), Some("somestreamer"));
        assert_eq!(extract_channel("twitch.tv/another_one/"), Some("another_one"));
        assert_eq!(extract_channel("https://youtube.com/watch?v=abc"), None);
    }
}
