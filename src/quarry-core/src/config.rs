use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "http://localhost:9200";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the engine; request paths are appended after a `/`
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings handed to the HTTP transport. The request pipeline itself never
/// times out or retries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub insecure_skip_verify: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Write JSON logs with rotation to this directory. Console only when unset
    #[serde(default)]
    pub directory: Option<String>,

    /// `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("quarry/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_filter() -> String {
    "quarry=info,quarry_rs=info,quarry_core=info".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            insecure_skip_verify: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path))?;
        tracing::debug!(path = %path, host = %config.host, "Loaded configuration");
        Ok(config)
    }

    /// Replace the host, e.g. from a command-line flag
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            transport: TransportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
