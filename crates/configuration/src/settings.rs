use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Application-level metadata reported to callers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// The version string reported by `version`. Falls back to "dev" when unset.
    pub version: Option<String>,
}

impl AppSettings {
    pub fn version_or_dev(&self) -> &str {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => "dev",
        }
    }
}

/// Contains parameters for the trade store connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// A sqlx SQLite URL, e.g. `sqlite://tradelog.db` or `sqlite::memory:`.
    pub url: String,
    /// The store is modeled as a single logical writer, so this is normally 1.
    pub max_connections: u32,
    /// How long an operation may wait for the connection before failing.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://tradelog.db".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
