// Configuration module entry point
// Loads the immutable startup configuration

mod state;
mod types;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PolicyConfig, ServerConfig, StaticFilesConfig};

/// Default config file, looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "server";

/// Environment variable prefix, nested keys separated by `__`
pub const ENV_PREFIX: &str = "BUNDLE";

impl Config {
    /// Load configuration from the default file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    /// Missing file is not an error, defaults apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(config_path, ENV_PREFIX)
    }

    /// Layer defaults, the optional file and `<env_prefix>_*` variables
    fn load_with(config_path: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the directory to serve
    ///
    /// Falls back to the process working directory when `server.root` is unset.
    pub fn root_dir(&self) -> io::Result<PathBuf> {
        match &self.server.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Resolve `hostname:port` to the address the listener binds
    ///
    /// Takes the first resolved address, so `localhost` binds to whatever
    /// the resolver lists first.
    pub async fn resolve_socket_addr(&self) -> io::Result<SocketAddr> {
        let host = self.server.hostname.as_str();
        let mut addrs = tokio::net::lookup_host((host, self.server.port)).await?;
        addrs.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("hostname '{host}' did not resolve to any address"),
            )
        })
    }

    /// URL shown in the startup banner
    pub fn listen_url(&self) -> String {
        format!("http://{}:{}", self.server.hostname, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                hostname: "localhost".to_string(),
                port: 8080,
                root: None,
                workers: None,
            },
            policy: PolicyConfig::default(),
            static_files: StaticFilesConfig { immutable: true },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
{
    config::Config::builder()
        .set_default("server.hostname", "localhost")?
        .set_default("server.port", 8080)?
        .set_default("policy.enable_cors", true)?
        .set_default("policy.enable_wasm_multithreading", true)?
        .set_default("static_files.immutable", true)?
        .set_default("logging.access_log", false)?
        .set_default("logging.access_log_format", "combined")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("this-config-file-does-not-exist").unwrap();
        assert_eq!(cfg.server.hostname, "localhost");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.root.is_none());
        assert!(cfg.policy.enable_cors);
        assert!(cfg.policy.enable_wasm_multithreading);
        assert!(cfg.static_files.immutable);
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_loaded_defaults_match_default_impl() {
        let loaded = Config::load_from("this-config-file-does-not-exist").unwrap();
        let built = Config::default();
        assert_eq!(loaded.server.hostname, built.server.hostname);
        assert_eq!(loaded.server.port, built.server.port);
        assert_eq!(loaded.policy, built.policy);
    }

    #[test]
    fn test_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("server.toml")).unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\nroot = \"/srv/build\"\n\n[policy]\nenable_cors = false"
        )
        .unwrap();

        // config::File::with_name tries known extensions, so pass the stem
        let stem = dir.path().join("server");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.root, Some(PathBuf::from("/srv/build")));
        assert!(!cfg.policy.enable_cors);
        assert!(cfg.policy.enable_wasm_multithreading);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("server.toml")).unwrap();
        writeln!(file, "[server]\nport = 9000\nhostname = \"0.0.0.0\"").unwrap();

        // Prefix private to this test so parallel tests see no extra variables
        std::env::set_var("BUNDLE_ENVTEST_SERVER__PORT", "9100");
        std::env::set_var("BUNDLE_ENVTEST_SERVER__WORKERS", "2");
        std::env::set_var("BUNDLE_ENVTEST_POLICY__ENABLE_CORS", "false");
        std::env::set_var("BUNDLE_ENVTEST_LOGGING__ACCESS_LOG_FORMAT", "json");

        let stem = dir.path().join("server");
        let cfg = Config::load_with(stem.to_str().unwrap(), "BUNDLE_ENVTEST").unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.hostname, "0.0.0.0");
        assert_eq!(cfg.server.workers, Some(2));
        assert!(!cfg.policy.enable_cors);
        assert!(cfg.policy.enable_wasm_multithreading);
        assert_eq!(cfg.logging.access_log_format, "json");
    }

    #[test]
    fn test_root_dir_falls_back_to_cwd() {
        let cfg = Config::default();
        assert_eq!(cfg.root_dir().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_listen_url() {
        assert_eq!(Config::default().listen_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_resolve_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.hostname = "127.0.0.1".to_string();
        cfg.server.port = 8081;
        let addr = cfg.resolve_socket_addr().await.unwrap();
        assert_eq!(addr, "127.0.0.1:8081".parse::<SocketAddr>().unwrap());
    }
}
