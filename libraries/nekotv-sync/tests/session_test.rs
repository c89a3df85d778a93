//! Integration tests for the watch session
//!
//! Covers preference restoration at startup, subscribe/unsubscribe
//! signalling, and persistence of the toggles.

use nekotv_playback::{
    NotificationSink, PlaybackConfig, PlaybackManager, Result, VideoItem, VideoKind, VideoSurface,
};
use nekotv_sync::{
    PreferenceStore, Reconciler, ServerEvent, TimeSync, Transport, WatchSession, PREF_ENABLED,
    PREF_MUTED,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

// ===== Fixtures =====

struct NullSurface;

impl VideoSurface for NullSurface {
    fn inject_script(&mut self, _kind: VideoKind) -> Result<()> {
        Ok(())
    }
    fn attach_player(&mut self, _kind: VideoKind, _item: &VideoItem) -> Result<()> {
        Ok(())
    }
    fn detach_player(&mut self, _kind: VideoKind) {}
    fn load_media(&mut self, _kind: VideoKind, _item: &VideoItem) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn is_playing(&self) -> bool {
        false
    }
    fn current_time(&self) -> Option<Duration> {
        Some(Duration::ZERO)
    }
    fn seek(&mut self, _position: Duration) {}
    fn playback_rate(&self) -> f64 {
        1.0
    }
    fn set_playback_rate(&mut self, _rate: f64) {}
    fn set_muted(&mut self, _muted: bool) {}
    fn set_volume(&mut self, _level: u8) {}
}

struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn autoplay_blocked(&mut self, _message: &str) {}
}

#[derive(Default)]
struct SignalLog {
    subscribes: usize,
    unsubscribes: usize,
}

struct FakeTransport(Rc<RefCell<SignalLog>>);

impl Transport for FakeTransport {
    fn send_subscribe(&mut self) {
        self.0.borrow_mut().subscribes += 1;
    }
    fn send_unsubscribe(&mut self) {
        self.0.borrow_mut().unsubscribes += 1;
    }
}

struct FakePrefs(Rc<RefCell<HashMap<String, String>>>);

impl PreferenceStore for FakePrefs {
    fn load(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
    fn store(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

fn manager() -> PlaybackManager {
    PlaybackManager::new(
        &PlaybackConfig::default(),
        Box::new(NullSurface),
        Box::new(NullNotifier),
    )
}

fn session_with(
    stored: &[(&str, &str)],
) -> (
    WatchSession,
    Rc<RefCell<SignalLog>>,
    Rc<RefCell<HashMap<String, String>>>,
) {
    let signals = Rc::new(RefCell::new(SignalLog::default()));
    let prefs = Rc::new(RefCell::new(
        stored
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>(),
    ));
    let session = WatchSession::new(
        manager(),
        Reconciler::default(),
        Box::new(FakeTransport(signals.clone())),
        Box::new(FakePrefs(prefs.clone())),
    );
    (session, signals, prefs)
}

// ===== Startup =====

#[test]
fn fresh_session_starts_disabled_and_unmuted() {
    let (session, signals, _prefs) = session_with(&[]);
    assert!(!session.is_enabled());
    assert!(!session.player().is_muted());
    assert_eq!(signals.borrow().subscribes, 0);
}

#[test]
fn persisted_flags_are_restored() {
    let (session, signals, _prefs) = session_with(&[(PREF_ENABLED, "t"), (PREF_MUTED, "t")]);
    assert!(session.is_enabled());
    assert!(session.player().is_muted());
    // Enabled at startup subscribes immediately
    assert_eq!(signals.borrow().subscribes, 1);
}

#[test]
fn unknown_flag_values_read_as_disabled() {
    let (session, _signals, _prefs) = session_with(&[(PREF_ENABLED, "yes")]);
    assert!(!session.is_enabled());
}

// ===== Toggles =====

#[test]
fn enabling_subscribes_and_persists() {
    let (mut session, signals, prefs) = session_with(&[]);

    session.set_enabled(true);

    assert_eq!(signals.borrow().subscribes, 1);
    assert_eq!(prefs.borrow().get(PREF_ENABLED).unwrap(), "t");
}

#[test]
fn disabling_unsubscribes_and_stops_playback() {
    let (mut session, signals, prefs) = session_with(&[(PREF_ENABLED, "t")]);

    session.set_enabled(false);

    assert_eq!(signals.borrow().unsubscribes, 1);
    assert_eq!(prefs.borrow().get(PREF_ENABLED).unwrap(), "f");
    assert!(session.player().state().active_backend.is_none());
}

#[test]
fn redundant_enable_does_not_resubscribe() {
    let (mut session, signals, _prefs) = session_with(&[(PREF_ENABLED, "t")]);

    session.set_enabled(true);

    assert_eq!(signals.borrow().subscribes, 1);
}

#[test]
fn mute_toggle_persists_the_flag() {
    let (mut session, _signals, prefs) = session_with(&[]);

    session.toggle_muted();
    assert!(session.player().is_muted());
    assert_eq!(prefs.borrow().get(PREF_MUTED).unwrap(), "t");

    session.toggle_muted();
    assert_eq!(prefs.borrow().get(PREF_MUTED).unwrap(), "f");
}

// ===== Message Entry Point =====

#[test]
fn handle_message_reaches_the_player() {
    let (mut session, _signals, _prefs) = session_with(&[(PREF_ENABLED, "t")]);

    session.handle_message(&ServerEvent::Connected {
        items: vec![VideoItem {
            id: "a".to_string(),
            url: "https://videos.example/a.webm".to_string(),
            kind: VideoKind::Raw,
            title: "a".to_string(),
            author: "anon".to_string(),
            duration: Some(Duration::from_secs(120)),
            is_temporary: false,
        }],
        position: 0,
        time: TimeSync::playing(Duration::from_secs(5)),
    });

    assert_eq!(session.player().item_count(), 1);
    assert!(session.player().state().active_backend.is_some());
}
