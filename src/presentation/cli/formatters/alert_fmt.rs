use colored::Colorize;

use crate::domain::entities::alert::Alert;
use crate::domain::value_objects::severity::Severity;

/// Strips ESC characters so file names and log lines cannot drive the terminal.
fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

fn severity_badge(severity: Severity) -> String {
    let label = format!(" {severity} ");
    match severity {
        Severity::Critical => format!("{}", label.on_red().white().bold()),
        Severity::High => format!("{}", label.on_yellow().black().bold()),
        Severity::Medium => format!("{}", label.on_bright_yellow().black()),
        Severity::Low => format!("{}", label.on_blue().white()),
    }
}

/// Renders one alert: badge and title, then its details indented.
#[must_use]
pub fn render_alert(alert: &Alert) -> String {
    let mut out = format!(
        "{} {} {}",
        severity_badge(alert.severity),
        alert.severity.emoji(),
        sanitize_terminal(&alert.title).bold()
    );
    for line in alert.details.lines() {
        out.push_str(&format!("\n  {}", sanitize_terminal(line).dimmed()));
    }
    out
}

pub fn format_alerts(alerts: &[Alert]) {
    for alert in alerts {
        println!();
        println!("{}", render_alert(alert));
    }
    println!();
}

pub fn print_no_alerts() {
    println!();
    println!("{}", "✅ No security issues detected".green().bold());
    println!();
}
