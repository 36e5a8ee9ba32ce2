#![allow(clippy::expect_used)]

use hostguard::application::services::change_detector::ChangeDetector;
use hostguard::domain::entities::fingerprint::{CacheRecord, FingerprintKey};
use hostguard::domain::ports::store::FingerprintStore;
use hostguard::infrastructure::persistence::file_store::FileFingerprintStore;

const T0: i64 = 1_700_000_000;
const COOLDOWN: i64 = 120;

fn key() -> FingerprintKey {
    FingerprintKey::for_scope("malware_patterns", "/var/www/html/public")
}

#[test]
fn first_alert_is_persisted_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileFingerprintStore::new(dir.path());
    let detector = ChangeDetector::new(&store);

    assert!(detector.evaluate_at(&key(), &["b.php", "a.php"], COOLDOWN, T0).alert);

    let raw = std::fs::read_to_string(store.record_path(&key())).expect("cache file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["timestamp"], T0);
    assert_eq!(value["items"], serde_json::json!(["a.php", "b.php"]));
}

#[test]
fn decisions_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = FileFingerprintStore::new(dir.path());
        ChangeDetector::new(&store).evaluate_at(&key(), &["x.php"], COOLDOWN, T0);
    }

    let store = FileFingerprintStore::new(dir.path());
    let detector = ChangeDetector::new(&store);
    assert!(!detector.evaluate_at(&key(), &["x.php"], COOLDOWN, T0 + 60 * 60).alert);
    assert!(detector.evaluate_at(&key(), &["x.php"], COOLDOWN, T0 + 121 * 60).alert);
}

#[test]
fn malformed_cache_is_a_first_observation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileFingerprintStore::new(dir.path());
    std::fs::write(store.record_path(&key()), "{not json").expect("write");

    let detector = ChangeDetector::new(&store);
    assert!(detector.evaluate_at(&key(), &["x.php"], COOLDOWN, T0).alert);
    assert_eq!(
        store.load(&key()),
        Some(CacheRecord::new(&["x.php"], T0))
    );
}

#[test]
fn cache_directory_is_created_on_demand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("state").join("security_cache");
    let store = FileFingerprintStore::new(&nested);

    assert!(ChangeDetector::new(&store).should_alert(&key(), &["x"], COOLDOWN));
    assert!(store.record_path(&key()).exists());
}

#[test]
fn unwritable_cache_still_alerts_every_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("cache");
    std::fs::write(&blocker, "a file where the directory should be").expect("write");
    let store = FileFingerprintStore::new(&blocker);
    let detector = ChangeDetector::new(&store);

    let first = detector.evaluate_at(&key(), &["x"], COOLDOWN, T0);
    assert!(first.alert);
    assert!(first.persist_error.is_some());
    assert!(detector.evaluate_at(&key(), &["x"], COOLDOWN, T0 + 1).alert);
}

#[test]
fn item_keys_are_order_independent() {
    let a = FingerprintKey::for_items("new_users", &["/home/eve", "/home/bob"]);
    let b = FingerprintKey::for_items("new_users", &["/home/bob", "/home/eve", "/home/bob"]);
    assert_eq!(a, b);
    assert!(a.as_str().starts_with("new_users_"));
}
