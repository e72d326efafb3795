//! `dosehub.toml` loading.
//!
//! The file is optional and every section falls back to its defaults.
//! `DOSEHUB_*` variables (and `RUST_LOG`) win over the file.

use serde::Deserialize;

use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::ValidationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Known device types.
    pub catalog: CatalogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory holding the browser package served under `/pkg`.
    pub assets_dir: String,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Device type catalog. Empty accepts any type.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub device_types: Vec<String>,
}

impl Config {
    /// Load configuration from `dosehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("dosehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DOSEHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("DOSEHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("DOSEHUB_BIND")
            && let Some((host, port)) = parse_bind(&val)
        {
            self.server.host = host;
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("DOSEHUB_ASSETS_DIR") {
            self.server.assets_dir = val;
        }
        if let Ok(val) = std::env::var("DOSEHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("DOSEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.device_types()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// The catalog as validated device types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] when an entry is blank.
    pub fn device_types(&self) -> Result<Vec<DeviceType>, ConfigError> {
        self.catalog
            .device_types
            .iter()
            .map(DeviceType::new)
            .collect::<Result<_, _>>()
            .map_err(ConfigError::Catalog)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            assets_dir: "pkg".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:dosehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dosehubd=info,dosehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            device_types: ["EPDN2", "Liulin", "Hawk"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Split a `host:port` bind address; `None` when the port is unusable.
fn parse_bind(value: &str) -> Option<(String, u16)> {
    let (host, port) = value.rsplit_once(':')?;
    let port = port.parse().ok().filter(|port| *port != 0)?;
    Some((host.to_string(), port))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Invalid catalog entry.
    #[error("invalid device type in catalog")]
    Catalog(#[source] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
