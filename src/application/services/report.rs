use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::domain::entities::alert::Alert;
use crate::domain::entities::socket::ListeningSocket;

/// Plain-text daily audit summary.
#[must_use]
pub fn daily_report(
    app_name: &str,
    generated_at: DateTime<Local>,
    alerts: &[Alert],
    open_ports: &[ListeningSocket],
) -> String {
    let mut report = format!("Daily Security Report for {app_name}\n");
    let _ = writeln!(
        report,
        "Generated at: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    if alerts.is_empty() {
        report.push_str("✅ No critical security issues detected.\n\n");
    } else {
        let _ = writeln!(report, "⚠️ {} security issues detected.\n", alerts.len());
        for alert in alerts {
            let _ = writeln!(report, "- {}", alert.title);
        }
        report.push('\n');
    }

    report.push_str("Open Ports:\n");
    if open_ports.is_empty() {
        report.push_str("(none)\n");
    }
    for socket in open_ports {
        let _ = writeln!(report, "{socket}");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::socket::Protocol;
    use chrono::TimeZone;
    use std::net::{IpAddr, Ipv4Addr};

    fn at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .unwrap_or_else(Local::now)
    }

    #[test]
    fn all_clear_report() {
        let ports = vec![ListeningSocket {
            protocol: Protocol::Tcp,
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 22,
        }];
        let report = daily_report("web-01", at(), &[], &ports);

        assert!(report.starts_with("Daily Security Report for web-01\n"));
        assert!(report.contains("Generated at: 2026-03-14 09:30:00\n\n"));
        assert!(report.contains("✅ No critical security issues detected."));
        assert!(report.contains("Open Ports:\ntcp   0.0.0.0:22\n"));
    }

    #[test]
    fn report_counts_and_lists_issues() {
        let alerts = vec![
            Alert::security("ssh_keys", "Recently Modified SSH Keys", "x"),
            Alert::security("disk_usage", "High Disk Usage", "y"),
        ];
        let report = daily_report("web-01", at(), &alerts, &[]);
        assert!(report.contains("⚠️ 2 security issues detected."));
        assert!(report.contains("- High Disk Usage\n"));
        assert!(report.contains("Open Ports:\n(none)\n"));
    }
}
