//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding [`EngineConfig::max_depth`]
pub const MAX_DEPTH_ENV: &str = "REQGUARD_MAX_DEPTH";

/// Configuration for the evaluation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum recursion depth through nested schemas and element schemas
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    32
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum recursion depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Load configuration from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(MAX_DEPTH_ENV) {
            config.max_depth = parse_positive(MAX_DEPTH_ENV, &raw)?;
        }
        Ok(config)
    }
}

/// Parse a strictly positive integer setting
pub fn parse_positive(name: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::invalid_value(name, raw, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::invalid_value(name, raw, e.to_string())),
    }
}
