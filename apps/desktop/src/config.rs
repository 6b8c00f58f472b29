//! Process configuration read from the environment.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "FLASHDECK_DB_PATH";
pub const LOG_VAR: &str = "FLASHDECK_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. `RUST_LOG` wins over `FLASHDECK_LOG`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup(DB_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let log_filter = lookup("RUST_LOG")
            .or_else(|| lookup(LOG_VAR))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self { db_path, log_filter }
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashdeck")
        .join("flashdeck.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert!(config.db_path.ends_with("flashdeck/flashdeck.db"));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DB_PATH_VAR, "/tmp/cards.db"),
            (LOG_VAR, "debug"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/cards.db"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rust_log_takes_precedence() {
        let config = Config::from_lookup(lookup(&[(LOG_VAR, "debug"), ("RUST_LOG", "warn")]));
        assert_eq!(config.log_filter, "warn");
    }
}
