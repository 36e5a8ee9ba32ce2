use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::check_status::CheckStatus;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::ResourceRule;

/// Reports each required service (matched by process name) as running or down.
pub struct RequiredServicesRule {
    services: Vec<String>,
}

impl RequiredServicesRule {
    #[must_use]
    pub const fn new(services: Vec<String>) -> Self {
        Self { services }
    }
}

impl ResourceRule for RequiredServicesRule {
    fn name(&self) -> &'static str {
        "required_services"
    }

    fn evaluate(&self, snapshot: &ResourceSnapshot, _thresholds: &ThresholdSet) -> Vec<CheckResult> {
        self.services
            .iter()
            .map(|service| {
                let running = snapshot.is_process_running(service);
                CheckResult {
                    metric: format!("service_{service}"),
                    value: if running { 1.0 } else { 0.0 },
                    unit: String::new(),
                    status: if running {
                        CheckStatus::Ok
                    } else {
                        CheckStatus::Critical
                    },
                    message: if running {
                        format!("Service {service} is running")
                    } else {
                        format!("Service {service} is not running")
                    },
                }
            })
            .collect()
    }
}
