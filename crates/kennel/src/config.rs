use std::{env, time::Duration};

/// Deployment environment, used to pick the default port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
}

impl Environment {
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("test") {
            Self::Test
        } else {
            Self::Development
        }
    }

    /// Port to listen on when none is given explicitly.
    pub fn default_port(self) -> u16 {
        match self {
            Self::Development => 3000,
            Self::Test => 3001,
        }
    }
}

/// Which repository implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl StorageBackend {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Self::Memory,
            _ => Self::Sqlite,
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment (default: development)
    pub environment: Environment,
    /// Storage backend (default: sqlite)
    pub storage_backend: StorageBackend,
    /// Path to SQLite database file (default: "kennel.db")
    pub sqlite_path: String,
    /// Seconds before an unanswered request is closed with 408 (default: 10)
    pub request_timeout_seconds: u64,
    /// Log output format (default: pretty)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KENNEL_ENV` - `test` selects the test environment (default: development)
    /// - `STORAGE_BACKEND` - `sqlite` or `memory` (default: sqlite)
    /// - `SQLITE_PATH` - SQLite database path (default: "kennel.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    /// - `LOG_FORMAT` - `json` for JSON logs (default: pretty)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: var("KENNEL_ENV")
                .map(|v| Environment::from_name(&v))
                .unwrap_or(Environment::Development),
            storage_backend: var("STORAGE_BACKEND")
                .map(|v| StorageBackend::from_name(&v))
                .unwrap_or(StorageBackend::Sqlite),
            sqlite_path: var("SQLITE_PATH").unwrap_or_else(|| "kennel.db".to_string()),
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            log_format: match var("LOG_FORMAT") {
                Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Get request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.storage_backend, StorageBackend::Sqlite);
        assert_eq!(config.sqlite_path, "kennel.db");
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_environment_selects_port() {
        let config = config_from(&[("KENNEL_ENV", "test")]);
        assert_eq!(config.environment.default_port(), 3001);

        let config = config_from(&[("KENNEL_ENV", "production")]);
        assert_eq!(config.environment.default_port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("SQLITE_PATH", "/tmp/dogs.db"),
            ("REQUEST_TIMEOUT_SECONDS", "30"),
            ("LOG_FORMAT", "JSON"),
        ]);

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.sqlite_path, "/tmp/dogs.db");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unparseable_timeout_falls_back() {
        let config = config_from(&[("REQUEST_TIMEOUT_SECONDS", "soon")]);
        assert_eq!(config.request_timeout_seconds, 10);
    }
}
