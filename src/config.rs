//! Configuration loading and constants.
//!
//! Configuration is layered: hardcoded defaults, then an optional TOML file,
//! then environment variables. Every setting has a working default so the
//! binary runs with no file and no environment at all.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Static assets (HTML, CSS, JS) - short cache, the page is tiny
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 300;

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

/// Health responses must never be served stale to a poller
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default directory for the static frontend
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "dbpulse=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// PostgreSQL connection settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Directory the static frontend is served from
    #[serde(default = "HttpServerConfig::default_static_dir")]
    pub static_dir: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            static_dir: Self::default_static_dir(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_static_dir() -> String {
        DEFAULT_STATIC_DIR.to_string()
    }
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_host")]
    pub host: String,
    #[serde(default = "DatabaseConfig::default_port")]
    pub port: u16,
    /// Database name
    #[serde(default = "DatabaseConfig::default_name")]
    pub name: String,
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,
    #[serde(default = "DatabaseConfig::default_password")]
    pub password: String,
    /// Upper bound on pooled connections
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    /// Maximum time to wait for a pooled connection, in seconds
    #[serde(default = "DatabaseConfig::default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            name: Self::default_name(),
            user: Self::default_user(),
            password: Self::default_password(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_seconds: Self::default_acquire_timeout(),
        }
    }
}

impl DatabaseConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    fn default_port() -> u16 {
        5432
    }

    fn default_name() -> String {
        "postgres".to_string()
    }

    fn default_user() -> String {
        "postgres".to_string()
    }

    fn default_password() -> String {
        "postgres".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_acquire_timeout() -> u64 {
        5
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus the process
    /// environment.
    ///
    /// A missing file is not an error; the defaults are used. Environment
    /// variables always win over file values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), but with an injected environment lookup so
    /// tests do not have to mutate process-global state.
    pub fn load_with_env<P, F>(path: P, env: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&contents)?
        } else {
            AppConfig::default()
        };

        config.apply_env(&env)?;
        config.validate()?;

        Ok(config)
    }

    /// Overlay environment variables onto the current values.
    fn apply_env<F>(&mut self, env: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = env("HOST") {
            self.http.host = host;
        }
        if let Some(port) = env("PORT") {
            self.http.port = parse_env("PORT", &port)?;
        }
        if let Some(dir) = env("STATIC_DIR") {
            self.http.static_dir = dir;
        }

        if let Some(host) = env("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = env("DB_PORT") {
            self.database.port = parse_env("DB_PORT", &port)?;
        }
        if let Some(name) = env("DB_NAME") {
            self.database.name = name;
        }
        if let Some(user) = env("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = env("DB_PASSWORD") {
            self.database.password = password;
        }

        if let Some(format) = env("LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.name.is_empty() {
            return Err(ConfigError::Validation(
                "database.name must not be empty".to_string(),
            ));
        }
        if self.database.user.is_empty() {
            return Err(ConfigError::Validation(
                "database.user must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::Validation(format!("{} is not a valid value for {}", value, key))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
