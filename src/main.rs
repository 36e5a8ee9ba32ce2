use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use hostguard::application::config::{expand_path, AppConfig, NotificationConfig};
use hostguard::application::services::dispatcher::AlertDispatcher;
use hostguard::application::services::monitor::MonitorService;
use hostguard::application::services::scanner::crontab::CrontabWatch;
use hostguard::application::services::scanner::malware::MalwareScanner;
use hostguard::application::services::scanner::SecurityScanner;
use hostguard::domain::ports::notifier::Notifier;
use hostguard::domain::rules::{default_rules, RuleEngine};
use hostguard::domain::value_objects::thresholds::ThresholdSet;
use hostguard::infrastructure::collectors::sysinfo_collector::SysinfoCollector;
use hostguard::infrastructure::notifications::composite::CompositeNotifier;
use hostguard::infrastructure::notifications::log_file::LogFileNotifier;
use hostguard::infrastructure::notifications::mail::MailNotifier;
use hostguard::infrastructure::notifications::webhook::WebhookNotifier;
use hostguard::infrastructure::persistence::file_store::FileFingerprintStore;
use hostguard::presentation::cli::app::{Cli, Commands};
use hostguard::presentation::cli::commands::comprehensive::run_comprehensive_check;
use hostguard::presentation::cli::commands::crontabs::run_monitor_crontabs;
use hostguard::presentation::cli::commands::daemon::{run_daemon, DaemonJobs};
use hostguard::presentation::cli::commands::malware::run_malware_check;
use hostguard::presentation::cli::commands::monitor::run_monitor;
use hostguard::presentation::cli::commands::security::run_security_check;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  HOSTGUARD — server watchdog".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn warn_if_unprivileged() {
    if !nix::unistd::geteuid().is_root() {
        tracing::warn!("Not running as root: some processes, logs and home directories may be unreadable");
    }
}

fn build_notifier(config: &NotificationConfig) -> CompositeNotifier {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    for channel in &config.channels {
        match channel.as_str() {
            "mail" => notifiers.push(Box::new(MailNotifier::new(
                config.sendmail_path.clone(),
                config.from.clone(),
                config.admin_emails.clone(),
            ))),
            "log" => notifiers.push(Box::new(
                config
                    .log_file
                    .as_deref()
                    .map_or_else(LogFileNotifier::default, LogFileNotifier::new),
            )),
            "webhook" => match config.webhook_url.as_ref() {
                Some(url) => match WebhookNotifier::new(url.clone(), config.app_name.clone()) {
                    Ok(notifier) => notifiers.push(Box::new(notifier)),
                    Err(e) => tracing::warn!("Webhook channel disabled: {e}"),
                },
                None => tracing::warn!("Webhook channel enabled without webhook_url"),
            },
            other => tracing::warn!("Unknown notification channel '{other}' ignored"),
        }
    }
    CompositeNotifier::new(notifiers)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();
    Ok(config)
}

const fn exit_code(alerts_raised: bool) -> ExitCode {
    if alerts_raised {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);
    warn_if_unprivileged();

    let config = load_config(cli.config.as_ref())?;

    // Manual DI — main.rs is the only place that knows concrete types
    let notifier = build_notifier(&config.notifications);
    tracing::debug!(channels = ?notifier.channels(), "Notification channels ready");
    let dispatcher = AlertDispatcher::new(&notifier);
    let store = FileFingerprintStore::new(config.cache_dir());
    let collector = SysinfoCollector::new();

    let rule_engine = RuleEngine::new(default_rules(&config.monitoring.required_services));
    let thresholds = ThresholdSet::from(&config.thresholds);
    let monitor = MonitorService::new(&collector, &rule_engine, &thresholds, &dispatcher);

    let scanner = SecurityScanner::new(&collector, &store, &config)
        .context("Invalid built-in security pattern")?;
    let malware = MalwareScanner::new(&store, &config.security)
        .context("Invalid built-in malware pattern")?;
    let cron_paths = config.paths.cron_paths.iter().map(|p| expand_path(p)).collect();
    let crontabs = CrontabWatch::new(&store, cron_paths);

    let code = match cli.command {
        Some(Commands::Monitor { json }) => exit_code(run_monitor(&monitor, json)?),
        Some(Commands::SecurityCheck { json }) => {
            exit_code(run_security_check(&scanner, &dispatcher, json)?)
        }
        Some(Commands::MalwareCheck { json }) => {
            exit_code(run_malware_check(&malware, &dispatcher, json)?)
        }
        Some(Commands::MonitorCrontabs) => {
            exit_code(run_monitor_crontabs(&scanner, &crontabs, &dispatcher))
        }
        Some(Commands::ComprehensiveCheck) => {
            run_comprehensive_check(&scanner, &malware, &dispatcher, &config.notifications.app_name);
            ExitCode::SUCCESS
        }
        Some(Commands::Daemon) | None => {
            print_banner();
            let jobs = DaemonJobs {
                monitor: &monitor,
                scanner: &scanner,
                malware: &malware,
                crontabs: &crontabs,
                dispatcher: &dispatcher,
                app_name: &config.notifications.app_name,
            };
            run_daemon(&jobs, &config.schedule).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
