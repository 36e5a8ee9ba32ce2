use super::dispatcher::AlertDispatcher;
use crate::domain::entities::alert::Alert;
use crate::domain::entities::check::CheckResult;
use crate::domain::ports::collector::SystemCollector;
use crate::domain::rules::RuleEngine;
use crate::domain::value_objects::thresholds::ThresholdSet;

pub const MONITOR_SENT_MESSAGE: &str = "Server monitoring alerts sent successfully!";
pub const MONITOR_UNSENT_MESSAGE: &str =
    "Server monitoring alerts detected but no administrator could be notified.";

/// Result of a single monitoring cycle.
pub struct MonitorCycleResult {
    pub checks: Vec<CheckResult>,
    pub alerts: Vec<Alert>,
    /// Whether the alerts reached at least one channel
    pub notified: bool,
}

impl MonitorCycleResult {
    #[must_use]
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Orchestrates a monitoring cycle: collect → evaluate → notify.
pub struct MonitorService<'a> {
    collector: &'a dyn SystemCollector,
    rule_engine: &'a RuleEngine,
    thresholds: &'a ThresholdSet,
    dispatcher: &'a AlertDispatcher<'a>,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub const fn new(
        collector: &'a dyn SystemCollector,
        rule_engine: &'a RuleEngine,
        thresholds: &'a ThresholdSet,
        dispatcher: &'a AlertDispatcher<'a>,
    ) -> Self {
        Self {
            collector,
            rule_engine,
            thresholds,
            dispatcher,
        }
    }

    /// Runs every resource check and notifies when any is not ok.
    ///
    /// # Errors
    ///
    /// Returns an error if the system metrics collection fails.
    pub fn run_once(&self) -> anyhow::Result<MonitorCycleResult> {
        let snapshot = self.collector.collect()?;
        let checks = self.rule_engine.analyze(&snapshot, self.thresholds);
        let alerts = RuleEngine::alerts(&checks);

        let notified = if alerts.is_empty() {
            tracing::debug!(checks = checks.len(), "All server checks passed");
            false
        } else {
            tracing::warn!(alerts_count = alerts.len(), "Server monitoring alerts");
            let sent = self
                .dispatcher
                .send_alerts(&alerts, MONITOR_SENT_MESSAGE, MONITOR_UNSENT_MESSAGE);
            self.dispatcher.log_alerts(&alerts, "monitor");
            sent
        };

        Ok(MonitorCycleResult {
            checks,
            alerts,
            notified,
        })
    }
}
