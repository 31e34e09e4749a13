use std::time::Duration;

use pagelog_core::constants::SESSION_ID_KEY;
use pagelog_core::models::DeviceProfile;
use pagelog_core::traits::{KeyValueStore, MemoryStore, PageContext};
use pagelog_events::ViewStart;
use pagelog_session::{
    clear_session_id, fingerprint_source, generate_fingerprint, generate_session_id,
    get_or_create_session_id, resolve_session_id, rolling_hash, Session, ViewTracker,
};
use test_fixtures::{FailingStore, FakePage, ManualClock};

// ─── Identity ──────────────────────────────────────────────

#[test]
fn session_id_is_stable_within_a_store() {
    let mut store = MemoryStore::new();
    let clock = ManualClock::default();

    let first = get_or_create_session_id(&mut store, &clock);
    clock.advance(Duration::from_secs(60));
    let second = get_or_create_session_id(&mut store, &clock);

    assert_eq!(first, second);
    assert_eq!(store.get(SESSION_ID_KEY), Some(first));
}

#[test]
fn clearing_forces_a_fresh_id() {
    let mut store = MemoryStore::new();
    let clock = ManualClock::default();

    let first = get_or_create_session_id(&mut store, &clock);
    clear_session_id(&mut store);
    assert_eq!(store.get(SESSION_ID_KEY), None);

    // Same millisecond: the random suffix alone must differ.
    let second = get_or_create_session_id(&mut store, &clock);
    assert_ne!(first, second);
}

#[test]
fn lookup_reports_reuse() {
    let mut store = MemoryStore::new();
    let clock = ManualClock::default();

    assert!(!resolve_session_id(&mut store, &clock).reused);
    assert!(resolve_session_id(&mut store, &clock).reused);
}

#[test]
fn existing_value_is_returned_unchanged() {
    let mut store = MemoryStore::new();
    store.set(SESSION_ID_KEY, "from-previous-load").unwrap();
    let id = get_or_create_session_id(&mut store, &ManualClock::default());
    assert_eq!(id, "from-previous-load");
}

#[test]
fn failing_store_still_yields_an_id() {
    let mut store = FailingStore::default();
    let id = get_or_create_session_id(&mut store, &ManualClock::default());
    assert!(!id.is_empty());
    assert_eq!(store.writes_attempted(), 1);
}

#[test]
fn generated_id_has_time_prefix_and_random_suffix() {
    let clock = ManualClock::default();
    let id = generate_session_id(pagelog_core::traits::Clock::now(&clock));
    let (prefix, suffix) = id.split_once('-').unwrap();
    assert_eq!(prefix, "loyw3v28");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

// ─── Fingerprint ───────────────────────────────────────────

#[test]
fn rolling_hash_matches_reference_values() {
    assert_eq!(rolling_hash(""), 0);
    assert_eq!(rolling_hash("a"), 97);
    assert_eq!(rolling_hash("ab"), 3105);
    // UTF-16 code units, not bytes.
    assert_eq!(rolling_hash("é€"), 15587);
}

#[test]
fn empty_profile_uses_unknown_placeholders() {
    let profile = DeviceProfile::default();
    let source = fingerprint_source(&profile);
    assert!(source.starts_with("userAgent:unknown|language:unknown|"));
    assert!(source.ends_with("|deviceMemory:unknown"));
    assert_eq!(source.matches('|').count(), 6);
    assert_eq!(generate_fingerprint(&profile), "0000ioe3z50000000000000000000000");
}

#[test]
fn full_profile_fingerprint_is_fixed() {
    let profile = FakePage::default().device_profile();
    assert_eq!(
        fingerprint_source(&profile),
        "userAgent:Mozilla/5.0 (X11; Linux x86_64) Test/1.0|language:en-US|\
         screenResolution:1920x1080|colorDepth:24|timezone:Europe/Berlin|\
         hardwareConcurrency:8|deviceMemory:8"
    );
    assert_eq!(generate_fingerprint(&profile), "0000hpfpni0000000000000000000000");
}

#[test]
fn profile_changes_change_the_fingerprint() {
    let base = FakePage::default().device_profile();
    let mut other = base.clone();
    other.timezone = Some("Asia/Tokyo".into());
    assert_ne!(generate_fingerprint(&base), generate_fingerprint(&other));
}

// ─── Session state ─────────────────────────────────────────

fn view(id: &str, at: u64) -> ViewStart {
    ViewStart {
        id: id.into(),
        session_id: "s-1".into(),
        path: "/".into(),
        url: "https://shop.example.com/".into(),
        start_timestamp: at,
        title: None,
        referrer: None,
    }
}

#[test]
fn session_closes_once() {
    let mut session = Session::start("s-1".into(), "fp".into(), None, 1_000);
    assert!(session.end_event().is_none());
    session.record_view();
    session.record_action();
    session.add_time_spent(400);

    assert!(session.close(2_000));
    assert!(!session.close(3_000));
    let end = session.end_event().unwrap();
    assert_eq!(end.end_timestamp, 2_000);
    assert!(!end.attributes.is_active);
    assert_eq!(end.metrics.view_count, 1);
    assert_eq!(end.metrics.action_count, 1);
    assert_eq!(end.metrics.time_spent, 400);
}

#[test]
fn start_event_reports_active_session() {
    let session = Session::start("s-1".into(), "fp".into(), Some("https://ref".into()), 1_000);
    let start = session.start_event();
    assert_eq!(start.id, "s-1");
    assert!(start.attributes.is_active);
    assert_eq!(start.attributes.referrer.as_deref(), Some("https://ref"));
}

#[test]
fn tracker_refuses_second_open_and_ignores_stray_close() {
    let mut tracker = ViewTracker::new();
    assert!(tracker.close(10).is_none());

    assert!(tracker.open(view("v-1", 100)));
    assert!(!tracker.open(view("v-2", 200)));
    assert_eq!(tracker.current().unwrap().id, "v-1");

    let end = tracker.close(350).unwrap();
    assert_eq!(end.id, "v-1");
    assert_eq!(end.time_spent, 250);
    assert!(!tracker.is_open());
    assert!(tracker.close(400).is_none());
}
