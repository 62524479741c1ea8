//! Adapter configuration

use reqguard_core::config::parse_positive;
use reqguard_core::{ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ApiConfig::max_body_size`]
pub const MAX_BODY_SIZE_ENV: &str = "REQGUARD_MAX_BODY_SIZE";

/// Configuration for the validation middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_size: default_max_body_size(),
            engine: EngineConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            engine: EngineConfig::from_lookup(&lookup)?,
            ..Self::default()
        };
        if let Some(raw) = lookup(MAX_BODY_SIZE_ENV) {
            config.max_body_size = parse_positive(MAX_BODY_SIZE_ENV, &raw)?;
        }
        Ok(config)
    }
}
