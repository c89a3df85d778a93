//! Persisted preference flags
//!
//! The surrounding application owns the actual storage (localStorage, a
//! config file, ...); this module only fixes the keys and the two-value
//! `"t"`/`"f"` encoding it uses for them.

/// Storage key for the watch-enabled flag
pub const PREF_ENABLED: &str = "watch-enabled";

/// Storage key for the muted flag
pub const PREF_MUTED: &str = "watch-muted";

/// Opaque string-keyed preference storage supplied by the embedder
pub trait PreferenceStore {
    /// Read a stored flag, `None` if never written
    fn load(&self, key: &str) -> Option<String>;

    /// Persist a flag
    fn store(&mut self, key: &str, value: &str);
}

/// Encode a boolean as the stored flag value
pub fn encode_flag(value: bool) -> &'static str {
    if value {
        "t"
    } else {
        "f"
    }
}

/// Decode a stored flag value; anything but `"t"` reads as false
pub fn decode_flag(value: &str) -> bool {
    value == "t"
}
