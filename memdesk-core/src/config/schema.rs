//! Configuration schema definitions

use crate::guard::ContainmentPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum accepted size of a submitted memory file (100 KB)
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 100 * 1024;

/// Root configuration for memdesk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Memory file storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Startup network discovery configuration
    #[serde(default)]
    pub network: NetworkConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum length in bytes of a submitted `content` field
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_content_length() -> usize {
    DEFAULT_MAX_CONTENT_LENGTH
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_content_length: default_max_content_length(),
        }
    }
}

/// Memory file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory holding the memory files.
    /// Empty means the directory containing the running executable.
    #[serde(default)]
    pub base_dir: String,
    /// Short memory filename
    #[serde(default = "default_short_file")]
    pub short_file: String,
    /// Long memory filename
    #[serde(default = "default_long_file")]
    pub long_file: String,
    /// How guarded access decides whether a path is inside `base_dir`
    #[serde(default)]
    pub containment: ContainmentPolicy,
}

fn default_short_file() -> String {
    "short_memory.txt".to_string()
}

fn default_long_file() -> String {
    "long_memory_buffer.txt".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: String::new(),
            short_file: default_short_file(),
            long_file: default_long_file(),
            containment: ContainmentPolicy::default(),
        }
    }
}

/// Public/private address discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// IP-echo endpoints, queried in order until one answers
    #[serde(default = "default_ip_endpoints")]
    pub ip_endpoints: Vec<String>,
    /// Per-endpoint timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ip_endpoints() -> Vec<String> {
    [
        "https://api.ipify.org",
        "https://ifconfig.me",
        "https://icanhazip.com",
        "https://checkip.amazonaws.com",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ip_endpoints: default_ip_endpoints(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Log file name prefix; the appender adds a date suffix
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_file() -> String {
    "error.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            file: default_log_file(),
            overrides: HashMap::new(),
        }
    }
}
