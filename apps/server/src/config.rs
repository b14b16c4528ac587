//! Service configuration
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config.yaml` / `config.toml` in the working directory (or the file
//!    passed with `--config` or `SPECREF_CONFIG`), when present
//! 3. Environment variables prefixed `SPECREF__`, with `__` separating
//!    sections, e.g. `SPECREF__SERVER__PORT=8080`
//!
//! A `.env` file is read into the environment first.

use serde::{Deserialize, Serialize};
use specref_assistant::AssistantSettings;
use specref_data::{DataSources, DEFAULT_COMPONENT_TYPES_FILE};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "SPECREF";
const DEFAULT_CONFIG_FILE: &str = "config";

/// Legacy variable names accepted for the assistant API key.
const API_KEY_FALLBACK_ENV: [&str; 2] = ["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub assistant: AssistantSettings,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty disables CORS headers.
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub component_types_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            component_types_file: PathBuf::from(DEFAULT_COMPONENT_TYPES_FILE),
        }
    }
}

impl DataConfig {
    pub fn sources(&self) -> DataSources {
        DataSources::new(&self.directory).with_component_types_file(&self.component_types_file)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,

    pub file_enabled: bool,
    pub file_directory: PathBuf,
    pub file_prefix: String,
    /// daily | hourly | minutely | never
    pub file_rotation: String,

    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,

    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: PathBuf::from("logs"),
            file_prefix: "specref".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "specref-server".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load with an explicit config file, which must exist when given.
    pub fn load_from(file: Option<&Path>) -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let defaults = config::Config::try_from(&Config::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let mut cfg: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if cfg.assistant.api_key.is_none() {
            cfg.assistant.api_key = API_KEY_FALLBACK_ENV
                .iter()
                .find_map(|name| std::env::var(name).ok())
                .filter(|key| !key.trim().is_empty());
        }

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be non-zero".to_string());
        }
        if self.data.directory.as_os_str().is_empty() {
            return Err("data.directory must be set".to_string());
        }
        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be between 0 and 1".to_string());
        }
        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return Err(format!(
                "logging.file_rotation must be daily, hourly, minutely or never (got '{}')",
                self.logging.file_rotation
            ));
        }
        if self.assistant.timeout_seconds == 0 {
            return Err("assistant.timeout_seconds must be non-zero".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid server.host '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
