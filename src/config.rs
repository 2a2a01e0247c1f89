//! Configuration management for RAX Register
//!
//! Loads settings from an optional config.toml with environment overrides.
//! Every key has a built-in default so the service starts without a file.

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::auth::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Environment variable prefix, e.g. `RAX_REGISTER_PORT=9000`
const ENV_PREFIX: &str = "RAX_REGISTER";

/// Complete service configuration (restart required for every value)
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    // ═══ NETWORK (Environment Override Supported) ═══
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    // ═══ CREDENTIALS ═══
    /// bcrypt work factor, 4..=31
    pub bcrypt_cost: u32,

    // ═══ CORS ═══
    /// Origins allowed to call the API with credentials
    /// Environment: RAX_REGISTER_ALLOWED_ORIGINS=http://a,http://b
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Docker production path first, then local development path
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("bcrypt_cost", i64::from(DEFAULT_BCRYPT_COST))?
            .set_default("allowed_origins", DEFAULT_ALLOWED_ORIGINS.to_vec())?
            .add_source(File::with_name("rax-register/config").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Message("bind_address cannot be empty".into()));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "bcrypt_cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST,
                self.bcrypt_cost
            )));
        }

        if self.allowed_origins.is_empty() {
            return Err(ConfigError::Message(
                "allowed_origins must list at least one origin".into(),
            ));
        }

        self.origin_header_values()?;

        Ok(())
    }

    /// Get bind address and port as a socket address
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Message(format!(
                    "invalid listen address {}:{}: {e}",
                    self.bind_address, self.port
                ))
            })
    }

    /// Allowed origins as header values for the CORS layer
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim()).map_err(|_| {
                    ConfigError::Message(format!("invalid CORS origin: {origin:?}"))
                })
            })
            .collect()
    }
}
