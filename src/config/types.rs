// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub policy: PolicyConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    /// Directory to serve (process working directory if not set)
    #[serde(default)]
    pub root: Option<PathBuf>,
    pub workers: Option<usize>,
}

/// Response header policy switches
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Send `Access-Control-Allow-Origin: *` on every response
    pub enable_cors: bool,
    /// Send COOP/COEP/CORP on documents and scripts (`SharedArrayBuffer` support)
    pub enable_wasm_multithreading: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_wasm_multithreading: true,
        }
    }
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct StaticFilesConfig {
    /// Mark served files as immutable in `Cache-Control`
    pub immutable: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
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
