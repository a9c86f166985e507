// Configuration module entry point
// Layering: defaults -> optional sitekit.toml -> SITEKIT_* env -> CLI flags

mod state;
mod types;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

use std::net::SocketAddr;
use std::path::Path;

impl Config {
    /// Load configuration from the specified file path (without extension).
    /// The file is optional; every key has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITEKIT"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", ".")?
            .set_default(
                "http.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("http.directory_listing", true)?
            .set_default("http.keep_alive", true)?
            .set_default("http.request_timeout", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default `sitekit.toml` location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("sitekit")
    }

    /// Apply command-line overrides on top of file/env configuration
    pub fn apply_overrides(
        &mut self,
        host: Option<&str>,
        port: Option<u16>,
        root: Option<&Path>,
    ) {
        if let Some(host) = host {
            self.server.host = host.to_string();
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(root) = root {
            self.server.root = root.to_path_buf();
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))
    }
}
