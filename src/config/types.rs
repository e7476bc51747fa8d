// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

use crate::resolver::IndexDocument;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Local gateway listener
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static root and index document
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AssetsConfig {
    /// Directory every request path is resolved under
    pub root: String,
    /// File served for `""` and `"/"`
    pub index_file: String,
    /// `Content-Type` sent with the index file
    pub index_content_type: String,
}

impl AssetsConfig {
    pub fn index_document(&self) -> IndexDocument {
        IndexDocument {
            file_name: self.index_file.clone(),
            content_type: self.index_content_type.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}
