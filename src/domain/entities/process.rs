use serde::{Deserialize, Serialize};

/// A running process as seen by the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cmdline: String,
    pub user: String,
}

impl std::fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<10} {:>7} {}", self.user, self.pid, self.cmdline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_contains_pid_and_cmdline() {
        let process = ProcessInfo {
            pid: 4242,
            name: "curl".to_string(),
            cmdline: "curl http://x/y.sh".to_string(),
            user: "www-data".to_string(),
        };
        let line = process.to_string();
        assert!(line.contains("4242"));
        assert!(line.contains("curl http://x/y.sh"));
        assert!(line.starts_with("www-data"));
    }
}
