use mailer::ContactSettings;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use store::StoreConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level (an `EnvFilter` directive; `RUST_LOG` wins when set)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Instruction store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// JSON array of instruction documents imported at startup
    #[serde(default)]
    pub seed_file: Option<String>,

    /// Contact-form email settings
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Contact-form settings plus the mail relay used to deliver them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactConfig {
    #[serde(flatten)]
    pub settings: ContactSettings,

    /// HTTP mail relay. Without one, emails are written to the log.
    #[serde(default)]
    pub relay_url: Option<String>,

    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            settings: ContactSettings::default(),
            relay_url: None,
            relay_timeout_secs: default_relay_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            store: StoreConfig::default(),
            seed_file: None,
            contact: ContactConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.{toml,yaml,json}`
    /// file, and `VGREEN_SERVER__*` environment variables, in increasing
    /// order of precedence.
    ///
    /// Nested keys use `__`, e.g. `VGREEN_SERVER__STORE__BACKEND=redb`.
    pub fn load() -> anyhow::Result<Self> {
        // A missing `.env` is normal outside local development.
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("VGREEN_SERVER")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_relay_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
