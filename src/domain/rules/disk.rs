use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::ResourceRule;

pub struct DiskSpaceRule;

impl ResourceRule for DiskSpaceRule {
    fn name(&self) -> &'static str {
        "disk_space"
    }

    fn evaluate(&self, snapshot: &ResourceSnapshot, thresholds: &ThresholdSet) -> Vec<CheckResult> {
        let Some(disk) = snapshot.root_disk() else {
            return vec![];
        };
        let usage = disk.usage_percent.round();

        vec![CheckResult {
            metric: "disk_space".to_string(),
            value: usage,
            unit: "%".to_string(),
            status: thresholds.disk.evaluate(usage),
            message: format!("Disk space usage is {usage:.0}% on {}", disk.mount_point),
        }]
    }
}
