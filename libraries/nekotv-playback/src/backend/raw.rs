//! Raw media adapter
//!
//! Plays direct file URLs in a native video element. No bootstrap script is
//! involved: the element is ready to take commands as soon as the surface
//! attaches it, and it exposes the full control set (playhead, rate, mute).

use super::{EmbedStage, VideoBackend};
use crate::surface::VideoSurface;
use crate::types::{VideoItem, VideoKind};
use std::time::{Duration, Instant};

/// Native video element adapter
#[derive(Default)]
pub struct RawBackend {
    attached: bool,
}

impl VideoBackend for RawBackend {
    fn kind(&self) -> VideoKind {
        VideoKind::Raw
    }

    fn can_handle(&self, _url: &str) -> bool {
        // Never auto-detected; the server tags direct files explicitly
        false
    }

    fn load(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        if self.attached {
            surface.load_media(VideoKind::Raw, item);
        } else {
            match surface.attach_player(VideoKind::Raw, item) {
                Ok(()) => self.attached = true,
                Err(e) => tracing::warn!(error = %e, "failed to attach video element"),
            }
        }
    }

    fn stage(&self) -> EmbedStage {
        if self.attached {
            EmbedStage::PlayerAttached
        } else {
            EmbedStage::Uninitialized
        }
    }

    fn play(&mut self, surface: &mut dyn VideoSurface) {
        if self.attached {
            surface.play();
        }
    }

    fn pause(&mut self, surface: &mut dyn VideoSurface) {
        if self.attached {
            surface.pause();
        }
    }

    fn time(&self, surface: &dyn VideoSurface, _now: Instant) -> Duration {
        if self.attached {
            surface.current_time().unwrap_or_default()
        } else {
            Duration::ZERO
        }
    }

    fn set_time(&mut self, surface: &mut dyn VideoSurface, _now: Instant, position: Duration) {
        if self.attached {
            surface.seek(position);
        }
    }

    fn playback_rate(&self, surface: &dyn VideoSurface) -> f64 {
        if self.attached {
            surface.playback_rate()
        } else {
            1.0
        }
    }

    fn set_playback_rate(&mut self, surface: &mut dyn VideoSurface, rate: f64) {
        if self.attached {
            surface.set_playback_rate(rate);
        }
    }

    fn set_muted(&mut self, surface: &mut dyn VideoSurface, muted: bool) {
        if self.attached {
            surface.set_muted(muted);
        }
    }

    fn set_volume(&mut self, surface: &mut dyn VideoSurface, level: u8) {
        if self.attached {
            surface.set_volume(level);
        }
    }

    fn unload(&mut self, surface: &mut dyn VideoSurface) {
        if self.attached {
            surface.detach_player(VideoKind::Raw);
        }
        self.attached = false;
    }

    fn on_script_ready(&mut self, _surface: &mut dyn VideoSurface) {}

    fn on_player_ready(&mut self, _surface: &mut dyn VideoSurface) {}
}
