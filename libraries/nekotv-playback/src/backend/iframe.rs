//! Plain iframe embed adapter
//!
//! The fallback for sources with no script API at all. There is no control
//! channel into the frame: play/pause/mute are permanent no-ops, and the
//! playhead is synthesized from the wall clock so the engine still has a
//! local time to reconcile against.

use super::{EmbedStage, VideoBackend};
use crate::clock::TimeAnchor;
use crate::surface::VideoSurface;
use crate::types::{VideoItem, VideoKind};
use std::time::{Duration, Instant};

/// Scriptless iframe embed adapter
#[derive(Default)]
pub struct IframeBackend {
    attached: bool,
    loaded: bool,
    anchor: TimeAnchor,
}

impl VideoBackend for IframeBackend {
    fn kind(&self) -> VideoKind {
        VideoKind::Iframe
    }

    fn can_handle(&self, _url: &str) -> bool {
        // Never auto-detected; items arrive explicitly tagged
        false
    }

    fn load(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        if self.attached {
            self.loaded = false;
            surface.load_media(VideoKind::Iframe, item);
        } else {
            match surface.attach_player(VideoKind::Iframe, item) {
                Ok(()) => self.attached = true,
                Err(e) => tracing::warn!(error = %e, "failed to attach iframe"),
            }
        }
    }

    fn stage(&self) -> EmbedStage {
        if self.loaded {
            EmbedStage::PlayerAttached
        } else if self.attached {
            EmbedStage::ScriptLoading
        } else {
            EmbedStage::Uninitialized
        }
    }

    fn has_playback_control(&self) -> bool {
        false
    }

    fn play(&mut self, _surface: &mut dyn VideoSurface) {}

    fn pause(&mut self, _surface: &mut dyn VideoSurface) {}

    fn time(&self, _surface: &dyn VideoSurface, now: Instant) -> Duration {
        self.anchor.get(now)
    }

    fn set_time(&mut self, _surface: &mut dyn VideoSurface, now: Instant, position: Duration) {
        self.anchor.set(now, position);
    }

    fn playback_rate(&self, _surface: &dyn VideoSurface) -> f64 {
        1.0
    }

    fn set_playback_rate(&mut self, _surface: &mut dyn VideoSurface, _rate: f64) {}

    fn set_muted(&mut self, _surface: &mut dyn VideoSurface, _muted: bool) {}

    fn set_volume(&mut self, _surface: &mut dyn VideoSurface, _level: u8) {}

    fn unload(&mut self, surface: &mut dyn VideoSurface) {
        if self.attached {
            surface.detach_player(VideoKind::Iframe);
        }
        self.attached = false;
        self.loaded = false;
        self.anchor.reset();
    }

    fn on_script_ready(&mut self, _surface: &mut dyn VideoSurface) {}

    fn on_player_ready(&mut self, _surface: &mut dyn VideoSurface) {
        // The frame's load event
        if self.attached {
            self.loaded = true;
        }
    }
}
