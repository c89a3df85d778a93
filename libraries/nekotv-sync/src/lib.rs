//! NekoTV - Server Timeline Synchronization
//!
//! Consumes decoded server timeline events and applies them to a
//! [`nekotv_playback::PlaybackManager`] with threshold-gated corrections:
//! corrections under the sync threshold (1600 ms) are ignored as noise, so
//! clients that are already close to the shared playhead never judder, and
//! the echo of a client's own action is absorbed without origin tagging.
//!
//! The [`WatchSession`] wraps a manager with a [`Reconciler`], the two
//! persisted preference flags (enabled, muted), and the outbound
//! subscribe/unsubscribe signals.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = WatchSession::new(player, Reconciler::default(), transport, prefs);
//!
//! // From the transport's message loop:
//! session.handle_message(&event);
//!
//! // From the UI:
//! session.toggle_enabled();
//! session.toggle_muted();
//! ```

mod events;
mod prefs;
mod reconciler;
mod session;

// Public exports
pub use events::{ServerEvent, TimeSync};
pub use prefs::{decode_flag, encode_flag, PreferenceStore, PREF_ENABLED, PREF_MUTED};
pub use reconciler::{Reconciler, SyncConfig};
pub use session::{Transport, WatchSession};
