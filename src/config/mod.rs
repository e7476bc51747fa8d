// Configuration module entry point
// Loads layered configuration (file, environment, defaults) and validates it

mod state;
mod types;

use std::net::SocketAddr;
use thiserror::Error;

use crate::logger::Level;

pub use state::AppState;
pub use types::{AssetsConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name, extension resolved by the `config` crate
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from `config.toml` in the working directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// Environment variables prefixed `RESOLVER` override the file, e.g.
    /// `RESOLVER_ASSETS__ROOT=/srv/static`.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RESOLVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("assets.root", "static")?
            .set_default("assets.index_file", "index.html")?
            .set_default("assets.index_content_type", "text/html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the resolver cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let index = self.assets.index_file.as_str();
        if index.is_empty() || index == "." || index == ".." || index.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "assets.index_file must be a plain file name, got '{index}'"
            )));
        }
        if self.assets.root.is_empty() {
            return Err(ConfigError::Invalid("assets.root must not be empty".to_string()));
        }
        if Level::parse(&self.logging.level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of error, warn, info, debug; got '{}'",
                self.logging.level
            )));
        }
        self.get_socket_addr()?;
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("Invalid address: {e}")))
    }
}
