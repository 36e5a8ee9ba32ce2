#![allow(clippy::expect_used)]

use hostguard::domain::entities::snapshot::ResourceSnapshot;
use hostguard::domain::rules::{default_rules, RuleEngine};
use hostguard::domain::value_objects::check_status::CheckStatus;
use hostguard::domain::value_objects::severity::Severity;
use hostguard::domain::value_objects::thresholds::ThresholdSet;

fn load_fixture(name: &str) -> ResourceSnapshot {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn status_of(checks: &[hostguard::domain::entities::check::CheckResult], metric: &str) -> CheckStatus {
    checks
        .iter()
        .find(|c| c.metric == metric)
        .unwrap_or_else(|| panic!("missing check {metric}"))
        .status
}

#[test]
fn healthy_server_passes_every_check() {
    let snapshot = load_fixture("healthy_server.json");
    let engine = RuleEngine::new(default_rules(&["mysqld".to_string()]));
    let checks = engine.analyze(&snapshot, &ThresholdSet::default());

    assert_eq!(checks.len(), 5);
    assert!(checks.iter().all(|c| c.status == CheckStatus::Ok), "{checks:?}");
    assert!(RuleEngine::alerts(&checks).is_empty());
}

#[test]
fn stressed_server_raises_alerts_critical_first() {
    let snapshot = load_fixture("stressed_server.json");
    let engine = RuleEngine::new(default_rules(&["mysqld".to_string()]));
    let checks = engine.analyze(&snapshot, &ThresholdSet::default());

    assert_eq!(status_of(&checks, "disk_space"), CheckStatus::Warning);
    assert_eq!(status_of(&checks, "memory_usage"), CheckStatus::Critical);
    assert_eq!(status_of(&checks, "cpu_load"), CheckStatus::Ok);
    assert_eq!(status_of(&checks, "swap_usage"), CheckStatus::Critical);
    assert_eq!(status_of(&checks, "service_mysqld"), CheckStatus::Critical);

    let alerts = RuleEngine::alerts(&checks);
    assert_eq!(alerts.len(), 4);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[3].severity, Severity::Medium);
    assert!(alerts[3].details.contains("Disk space usage is 84%"));
}

#[test]
fn custom_thresholds_change_the_outcome() {
    let snapshot = load_fixture("stressed_server.json");
    let engine = RuleEngine::new(default_rules(&[]));
    let mut thresholds = ThresholdSet::default();
    thresholds.disk.warning = 85.0;

    let checks = engine.analyze(&snapshot, &thresholds);
    assert_eq!(status_of(&checks, "disk_space"), CheckStatus::Ok);
    assert!(checks.iter().all(|c| c.metric != "service_mysqld"));
}
