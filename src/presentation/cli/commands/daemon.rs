use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

use super::comprehensive::execute_comprehensive_check;
use super::crontabs::execute_crontab_watch;
use super::malware::execute_malware_check;
use super::security::execute_security_check;
use crate::application::config::ScheduleConfig;
use crate::application::services::dispatcher::AlertDispatcher;
use crate::application::services::monitor::MonitorService;
use crate::application::services::scanner::crontab::CrontabWatch;
use crate::application::services::scanner::malware::MalwareScanner;
use crate::application::services::scanner::SecurityScanner;

/// Everything the scheduled jobs need, borrowed from `main`.
pub struct DaemonJobs<'a> {
    pub monitor: &'a MonitorService<'a>,
    pub scanner: &'a SecurityScanner<'a>,
    pub malware: &'a MalwareScanner<'a>,
    pub crontabs: &'a CrontabWatch<'a>,
    pub dispatcher: &'a AlertDispatcher<'a>,
    pub app_name: &'a str,
}

fn every(secs: u64) -> Interval {
    let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Runs each job on its own interval until Ctrl+C.
///
/// Jobs run one at a time on this task, so they never overlap. Every job
/// fires once at startup. A failed cycle is logged and the loop continues.
/// SIGTERM is not handled.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for setup failures.
pub async fn run_daemon(jobs: &DaemonJobs<'_>, schedule: &ScheduleConfig) -> anyhow::Result<()> {
    tracing::info!(
        monitor_secs = schedule.monitor_secs,
        security_secs = schedule.security_secs,
        malware_secs = schedule.malware_secs,
        crontabs_secs = schedule.crontabs_secs,
        comprehensive_secs = schedule.comprehensive_secs,
        "Daemon started"
    );

    let mut monitor = every(schedule.monitor_secs);
    let mut security = every(schedule.security_secs);
    let mut malware = every(schedule.malware_secs);
    let mut crontabs = every(schedule.crontabs_secs);
    let mut comprehensive = every(schedule.comprehensive_secs);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = monitor.tick() => {
                match jobs.monitor.run_once() {
                    Ok(result) => tracing::info!(
                        checks = result.checks.len(),
                        alerts_count = result.alerts.len(),
                        "Monitor cycle finished"
                    ),
                    Err(e) => tracing::error!("Monitor cycle failed: {e:#}"),
                }
            }
            _ = security.tick() => {
                let alerts = execute_security_check(jobs.scanner, jobs.dispatcher);
                tracing::info!(alerts_count = alerts.len(), "Security cycle finished");
            }
            _ = malware.tick() => {
                let alerts = execute_malware_check(jobs.malware, jobs.dispatcher);
                tracing::info!(alerts_count = alerts.len(), "Malware cycle finished");
            }
            _ = crontabs.tick() => {
                let alerts = execute_crontab_watch(jobs.scanner, jobs.crontabs, jobs.dispatcher);
                tracing::info!(alerts_count = alerts.len(), "Crontab cycle finished");
            }
            _ = comprehensive.tick() => {
                let outcome = execute_comprehensive_check(
                    jobs.scanner,
                    jobs.malware,
                    jobs.dispatcher,
                    jobs.app_name,
                );
                tracing::info!(alerts_count = outcome.alerts.len(), "Comprehensive audit finished");
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                println!("\nStopping hostguard...");
                break;
            }
        }
    }
    Ok(())
}
