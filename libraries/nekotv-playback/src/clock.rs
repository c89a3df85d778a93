//! Injectable time source and synthesized playheads
//!
//! Backends without a native clock (plain iframes, the Twitch embed) report
//! a playhead synthesized from wall-clock time elapsed since the last seek.
//! The clock itself is a trait so the readiness and autoplay machinery can
//! be driven deterministically in tests.

use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;
}

/// System monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Wall-clock playhead for backends with no native clock
///
/// Remembers the instant at which the playhead was last pinned; the current
/// position is that position plus the time elapsed since. Reports zero until
/// the first pin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeAnchor {
    anchor: Option<(Instant, Duration)>,
}

impl TimeAnchor {
    /// Create an unpinned anchor
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// Pin the playhead to `position` as of `now`
    pub fn set(&mut self, now: Instant, position: Duration) {
        self.anchor = Some((now, position));
    }

    /// Current synthesized position
    pub fn get(&self, now: Instant) -> Duration {
        match self.anchor {
            Some((at, position)) => position + now.saturating_duration_since(at),
            None => Duration::ZERO,
        }
    }

    /// Forget the pin (playhead reads zero again)
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}
