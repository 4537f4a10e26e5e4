//! # Configuration
//!
//! The driver reads one TOML file:
//!
//! ```toml
//! # every service behind one address, individual entries override it
//! gateway = "10.0.0.5:8080"
//!
//! [services]
//! preserve-service = "10.0.0.7:14568"
//!
//! [[users]]
//! username = "fdse_microservice"
//! password = "111111"
//! ```
//!
//! Everything else has a default: `verification_code = "1234"`,
//! `request_timeout_secs = 30`, `bypass_proxy = true`, `travel_window_days = 100`.

use crate::directory::{StaticDirectory, ALL_SERVICES};
use crate::model::{Credentials, MAX_WINDOW_DAYS};
use crate::session::DEFAULT_VERIFICATION_CODE;
use crate::transport::TransportConfig;
use crate::workflow::WorkflowSettings;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("No address for services: {}", .0.join(", "))]
    MissingServices(Vec<String>),

    #[error("Requested {requested} users but only {available} are configured")]
    NotEnoughUsers { requested: usize, available: usize },

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

fn default_verification_code() -> String {
    DEFAULT_VERIFICATION_CODE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_window_days() -> u32 {
    100
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Fallback address for any service without its own entry.
    #[serde(default)]
    pub gateway: Option<String>,
    /// Logical service name to `host:port`.
    #[serde(default)]
    pub services: HashMap<String, String>,
    #[serde(default)]
    pub users: Vec<Credentials>,
    #[serde(default = "default_verification_code")]
    pub verification_code: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub bypass_proxy: bool,
    #[serde(default = "default_window_days")]
    pub travel_window_days: u32,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), users = config.users.len(), "Config loaded");
        Ok(config)
    }

    /// Parses and validates.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.directory().missing();
        if !missing.is_empty() {
            return Err(ConfigError::MissingServices(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be > 0".into()));
        }
        if self.travel_window_days == 0 {
            return Err(ConfigError::Invalid("travel_window_days must be > 0".into()));
        }
        if self.travel_window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Invalid(format!(
                "travel_window_days must be <= {MAX_WINDOW_DAYS}"
            )));
        }
        Ok(())
    }

    /// The first `count` configured users.
    pub fn users(&self, count: usize) -> Result<&[Credentials], ConfigError> {
        self.users
            .get(..count)
            .ok_or(ConfigError::NotEnoughUsers {
                requested: count,
                available: self.users.len(),
            })
    }

    /// Gateway entries for every known service, overlaid with explicit ones.
    pub fn directory(&self) -> StaticDirectory {
        let mut addresses: HashMap<String, String> = match &self.gateway {
            Some(gateway) => ALL_SERVICES
                .iter()
                .map(|service| (service.to_string(), gateway.clone()))
                .collect(),
            None => HashMap::new(),
        };
        addresses.extend(self.services.clone());
        StaticDirectory::new(addresses)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            bypass_proxy: self.bypass_proxy,
        }
    }

    /// Workflow settings for a run submitting each order `repeat` times.
    pub fn workflow(&self, repeat: u32) -> WorkflowSettings {
        WorkflowSettings {
            repeat,
            verification_code: self.verification_code.clone(),
            travel_window_days: self.travel_window_days,
        }
    }
}
