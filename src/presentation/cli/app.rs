use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hostguard — server watchdog
///
/// Checks resource thresholds and compromise indicators, and notifies
/// administrators once per finding until it changes or its cooldown expires.
#[derive(Parser, Debug)]
#[command(name = "hostguard")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to the daemon)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check disk, memory, load, swap and required services
    #[command(alias = "m")]
    Monitor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look for compromise indicators on the host
    #[command(alias = "sec")]
    SecurityCheck {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan the web application tree for injected PHP
    #[command(alias = "mal")]
    MalwareCheck {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch crontabs for recent modification and content changes
    #[command(alias = "cron")]
    MonitorCrontabs,

    /// Full audit ending in a daily report
    #[command(alias = "audit")]
    ComprehensiveCheck,

    /// Run every job on its configured schedule until interrupted
    #[command(alias = "d")]
    Daemon,
}
