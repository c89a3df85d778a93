//! YouTube IFrame API adapter
//!
//! The IFrame API needs its bootstrap script loaded before any player can be
//! constructed, so this adapter walks the full embed lifecycle. A load
//! arriving mid-bootstrap is queued; only the latest queued item is serviced
//! once the script is warm.

use super::{EmbedStage, VideoBackend};
use crate::surface::VideoSurface;
use crate::types::{VideoItem, VideoKind};
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

static WATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com.*v=([A-Za-z0-9_-]+)").expect("hardcoded regex")
});
static SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").expect("hardcoded regex"));
static SHORTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/shorts/([A-Za-z0-9_-]+)").expect("hardcoded regex")
});
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]+)").expect("hardcoded regex")
});

/// Extract the video id from any of the YouTube URL shapes
/// (watch, youtu.be, shorts, embed)
pub fn extract_video_id(url: &str) -> Option<&str> {
    for re in [&*WATCH_RE, &*SHORT_RE, &*SHORTS_RE, &*EMBED_RE] {
        if let Some(m) = re.captures(url).and_then(|c| c.get(1)) {
            return Some(m.as_str());
        }
    }
    None
}

/// YouTube IFrame API player adapter
#[derive(Default)]
pub struct YouTubeBackend {
    stage: EmbedStage,

    /// Latest load request waiting for the script or an in-flight attach
    pending: Option<VideoItem>,

    /// A widget construction has been started but not yet reported ready
    attaching: bool,
}

impl YouTubeBackend {
    fn start_attach(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        match surface.attach_player(VideoKind::YouTube, item) {
            Ok(()) => self.attaching = true,
            Err(e) => tracing::warn!(error = %e, "failed to attach YouTube player"),
        }
    }
}

impl VideoBackend for YouTubeBackend {
    fn kind(&self) -> VideoKind {
        VideoKind::YouTube
    }

    fn can_handle(&self, url: &str) -> bool {
        extract_video_id(url).is_some()
    }

    fn load(&mut self, surface: &mut dyn VideoSurface, item: &VideoItem) {
        match self.stage {
            EmbedStage::Uninitialized => {
                self.pending = Some(item.clone());
                match surface.inject_script(VideoKind::YouTube) {
                    Ok(()) => self.stage = EmbedStage::ScriptLoading,
                    Err(e) => tracing::warn!(error = %e, "failed to inject YouTube script"),
                }
            }
            EmbedStage::ScriptLoading => {
                // Latest wins; the superseded item is simply dropped
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
                surface.load_media(VideoKind::YouTube, item);
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

    fn time(&self, surface: &dyn VideoSurface, _now: Instant) -> Duration {
        if self.is_ready() {
            surface.current_time().unwrap_or_default()
        } else {
            Duration::ZERO
        }
    }

    fn set_time(&mut self, surface: &mut dyn VideoSurface, _now: Instant, position: Duration) {
        if self.is_ready() {
            surface.seek(position);
        }
    }

    fn playback_rate(&self, surface: &dyn VideoSurface) -> f64 {
        if self.is_ready() {
            surface.playback_rate()
        } else {
            1.0
        }
    }

    fn set_playback_rate(&mut self, surface: &mut dyn VideoSurface, rate: f64) {
        if self.is_ready() {
            surface.set_playback_rate(rate);
        }
    }

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
        match self.stage {
            EmbedStage::PlayerAttached => {
                surface.detach_player(VideoKind::YouTube);
                // Script stays warm for reuse
                self.stage = EmbedStage::ScriptLoaded;
            }
            EmbedStage::ScriptLoaded if self.attaching => {
                surface.detach_player(VideoKind::YouTube);
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
            surface.load_media(VideoKind::YouTube, &item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_id_from_short_urls() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_id_from_shorts_and_embed_urls() {
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/abc_-123"),
            Some("abc_-123")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/abc_-123"),
            Some("abc_-123")
        );
    }

    #[test]
    fn rejects_non_youtube_urls() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("https://twitch.tv/streamer"), None);
    }
}
