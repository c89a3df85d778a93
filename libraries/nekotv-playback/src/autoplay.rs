//! Autoplay-restriction watchdog
//!
//! Browsers may refuse an automatic `play()` until the user has interacted
//! with the page. After issuing a play attempt the watchdog waits, verifies
//! that playback actually started, retries once, and escalates to a
//! user-facing prompt if the retry also fails. One explicit state sequence
//! (attempt → wait → retry → wait → escalate) driven by the owner's clock.

use std::time::{Duration, Instant};

/// What the owner should do after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayVerdict {
    /// Nothing to do right now
    Idle,

    /// Issue one more play attempt
    Retry,

    /// Give up and request a user gesture
    Escalate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchdogState {
    /// Not armed
    Idle,

    /// First attempt issued, waiting to verify
    Watching { deadline: Instant },

    /// Retry issued, waiting to verify
    Rechecking { deadline: Instant },

    /// Prompt requested; only a user gesture resumes playback
    Escalated,
}

/// Verifies that automatic play attempts actually start playback
#[derive(Debug, Clone, Copy)]
pub struct AutoplayWatchdog {
    state: WatchdogState,
    check: Duration,
    recheck: Duration,
}

impl AutoplayWatchdog {
    /// Create a disarmed watchdog with the given verification windows
    pub fn new(check: Duration, recheck: Duration) -> Self {
        Self {
            state: WatchdogState::Idle,
            check,
            recheck,
        }
    }

    /// Arm after an automatic play attempt
    pub fn arm(&mut self, now: Instant) {
        self.state = WatchdogState::Watching {
            deadline: now + self.check,
        };
    }

    /// Disarm (playback confirmed externally, or the surface went away)
    pub fn disarm(&mut self) {
        self.state = WatchdogState::Idle;
    }

    /// Whether the prompt has been requested
    pub fn is_escalated(&self) -> bool {
        self.state == WatchdogState::Escalated
    }

    /// Drive the state machine
    ///
    /// `playing` is the surface's report of whether media is progressing.
    /// Returns `Retry` exactly once and `Escalate` exactly once per armed
    /// attempt.
    pub fn poll(&mut self, now: Instant, playing: bool) -> AutoplayVerdict {
        match self.state {
            WatchdogState::Idle | WatchdogState::Escalated => AutoplayVerdict::Idle,
            WatchdogState::Watching { deadline } => {
                if playing {
                    self.state = WatchdogState::Idle;
                    AutoplayVerdict::Idle
                } else if now >= deadline {
                    self.state = WatchdogState::Rechecking {
                        deadline: now + self.recheck,
                    };
                    AutoplayVerdict::Retry
                } else {
                    AutoplayVerdict::Idle
                }
            }
            WatchdogState::Rechecking { deadline } => {
                if playing {
                    self.state = WatchdogState::Idle;
                    AutoplayVerdict::Idle
                } else if now >= deadline {
                    self.state = WatchdogState::Escalated;
                    AutoplayVerdict::Escalate
                } else {
                    AutoplayVerdict::Idle
                }
            }
        }
    }
}

impl Default for AutoplayWatchdog {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchdog() -> AutoplayWatchdog {
        AutoplayWatchdog::new(Duration::from_secs(2), Duration::from_secs(1))
    }

    #[test]
    fn disarmed_watchdog_stays_idle() {
        let mut w = watchdog();
        assert_eq!(w.poll(Instant::now(), false), AutoplayVerdict::Idle);
    }

    #[test]
    fn playing_before_deadline_settles() {
        let start = Instant::now();
        let mut w = watchdog();
        w.arm(start);

        assert_eq!(w.poll(start + Duration::from_millis(500), true), AutoplayVerdict::Idle);
        // Settled: a later stall does not re-trigger
        assert_eq!(w.poll(start + Duration::from_secs(10), false), AutoplayVerdict::Idle);
    }

    #[test]
    fn stalled_playback_retries_then_escalates() {
        let start = Instant::now();
        let mut w = watchdog();
        w.arm(start);

        assert_eq!(w.poll(start + Duration::from_secs(1), false), AutoplayVerdict::Idle);
        assert_eq!(w.poll(start + Duration::from_secs(2), false), AutoplayVerdict::Retry);

        let retry_at = start + Duration::from_secs(2);
        assert_eq!(
            w.poll(retry_at + Duration::from_millis(500), false),
            AutoplayVerdict::Idle
        );
        assert_eq!(
            w.poll(retry_at + Duration::from_secs(1), false),
            AutoplayVerdict::Escalate
        );
        assert!(w.is_escalated());

        // Escalation happens once
        assert_eq!(
            w.poll(retry_at + Duration::from_secs(5), false),
            AutoplayVerdict::Idle
        );
    }

    #[test]
    fn retry_that_takes_settles() {
        let start = Instant::now();
        let mut w = watchdog();
        w.arm(start);

        assert_eq!(w.poll(start + Duration::from_secs(2), false), AutoplayVerdict::Retry);
        assert_eq!(w.poll(start + Duration::from_secs(3), true), AutoplayVerdict::Idle);
        assert!(!w.is_escalated());
    }

    #[test]
    fn disarm_cancels_a_pending_check() {
        let start = Instant::now();
        let mut w = watchdog();
        w.arm(start);
        w.disarm();
        assert_eq!(w.poll(start + Duration::from_secs(10), false), AutoplayVerdict::Idle);
    }
}
