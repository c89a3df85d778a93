//! Timestamp parsing and formatting
//!
//! Moderation commands carry seek targets as `"ss"`, `"mm:ss"` or
//! `"hh:mm:ss"` strings, and the playlist UI renders durations the same way
//! (with `∞` for live streams).

use crate::error::{PlaybackError, Result};
use std::time::Duration;

/// Parse a `"ss(.s)"`, `"mm:ss"` or `"hh:mm:ss"` timestamp
pub fn parse_timestamp(input: &str) -> Result<Duration> {
    let invalid = || PlaybackError::InvalidTimestamp(input.to_string());

    let parts: Vec<&str> = input.trim().split(':').collect();
    let seconds = match parts.as_slice() {
        [secs] => secs.parse::<f64>().map_err(|_| invalid())?,
        [mins, secs] => {
            let mins: u64 = mins.parse().map_err(|_| invalid())?;
            let secs: f64 = secs.parse().map_err(|_| invalid())?;
            mins as f64 * 60.0 + secs
        }
        [hours, mins, secs] => {
            let hours: u64 = hours.parse().map_err(|_| invalid())?;
            let mins: u64 = mins.parse().map_err(|_| invalid())?;
            let secs: f64 = secs.parse().map_err(|_| invalid())?;
            hours as f64 * 3600.0 + mins as f64 * 60.0 + secs
        }
        _ => return Err(invalid()),
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs_f64(seconds))
}

/// Format a duration as `"m:ss"` (or `"h:mm:ss"` past an hour); `None`
/// renders as `"∞"` for live streams
pub fn format_timestamp(duration: Option<Duration>) -> String {
    let Some(duration) = duration else {
        return "∞".to_string();
    };
    let total = duration.as_secs();
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}
