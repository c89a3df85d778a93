//! Volume state
//!
//! Level and mute flag owned by the playback manager and pushed to whichever
//! backend is active. The embed widgets take the level directly, so there is
//! no gain math here.

/// Volume level (0-100) with an independent mute flag
#[derive(Debug, Clone, Copy)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Create a volume controller
    pub fn new(level: u8, muted: bool) -> Self {
        Self {
            level: level.min(100),
            muted,
        }
    }

    /// Set the level (clamped to 0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Current level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute (preserves the level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle the mute flag
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Whether muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped() {
        let mut v = Volume::new(150, false);
        assert_eq!(v.level(), 100);
        v.set_level(200);
        assert_eq!(v.level(), 100);
        v.set_level(30);
        assert_eq!(v.level(), 30);
    }

    #[test]
    fn mute_preserves_level() {
        let mut v = Volume::new(60, false);
        v.mute();
        assert!(v.is_muted());
        assert_eq!(v.level(), 60);
        v.toggle_mute();
        assert!(!v.is_muted());
    }
}
