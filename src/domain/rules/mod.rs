pub mod cpu;
pub mod disk;
pub mod memory;
pub mod services;
pub mod swap;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// A deterministic resource check over a snapshot.
/// Rules are pure functions: snapshot + thresholds in, check results out. No I/O.
pub trait ResourceRule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Evaluates the rule against a snapshot using the given thresholds
    fn evaluate(&self, snapshot: &ResourceSnapshot, thresholds: &ThresholdSet)
        -> Vec<CheckResult>;
}

/// Returns the resource rules in reporting order: disk, memory, cpu, swap, services
#[must_use]
pub fn default_rules(required_services: &[String]) -> Vec<Box<dyn ResourceRule>> {
    vec![
        Box::new(disk::DiskSpaceRule),
        Box::new(memory::MemoryUsageRule),
        Box::new(cpu::CpuLoadRule),
        Box::new(swap::SwapUsageRule),
        Box::new(services::RequiredServicesRule::new(required_services.to_vec())),
    ]
}

/// Engine that runs a collection of rules against resource snapshots
pub struct RuleEngine {
    rules: Vec<Box<dyn ResourceRule>>,
}

impl RuleEngine {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn ResourceRule>>) -> Self {
        Self { rules }
    }

    /// Runs every rule, keeping rule order so output stays stable between runs
    #[must_use]
    pub fn analyze(
        &self,
        snapshot: &ResourceSnapshot,
        thresholds: &ThresholdSet,
    ) -> Vec<CheckResult> {
        self.rules
            .iter()
            .flat_map(|rule| rule.evaluate(snapshot, thresholds))
            .collect()
    }

    /// Turns non-ok checks into alerts, critical first
    #[must_use]
    pub fn alerts(checks: &[CheckResult]) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = checks.iter().filter_map(Alert::from_check).collect();
        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        alerts
    }
}
