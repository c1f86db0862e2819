//! Runtime configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), DATA_FILE (JSON store path; unset keeps
//! everything in memory), HISTORY_LIMIT (default 10), DEMO_ROSTER (1/true seeds demo players
//! when the store is empty).

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
    pub history_limit: usize,
    pub demo_roster: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_history_limit() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: None,
            history_limit: default_history_limit(),
            demo_roster: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_else(default_port);
        let data_file = lookup("DATA_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let history_limit = lookup("HISTORY_LIMIT")
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or_else(default_history_limit);
        let demo_roster = lookup("DEMO_ROSTER")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            host,
            port,
            data_file,
            history_limit,
            demo_roster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_FILE", "data/players.json"),
            ("HISTORY_LIMIT", "25"),
            ("DEMO_ROSTER", "true"),
        ]));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_file, Some(PathBuf::from("data/players.json")));
        assert_eq!(cfg.history_limit, 25);
        assert!(cfg.demo_roster);
    }

    #[test]
    fn bad_port_falls_back() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port"), ("DATA_FILE", "  ")]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_file, None);
    }
}
