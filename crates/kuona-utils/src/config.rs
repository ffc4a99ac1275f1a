//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Environment variable holding the deployment environment name
pub const ENVIRONMENT_ENV: &str = "KUONA_ENV";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version reported in outputs
    pub version: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Kuona API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Build the configuration, taking the environment name from `KUONA_ENV`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(environment) = std::env::var(ENVIRONMENT_ENV) {
            if !environment.trim().is_empty() {
                config.environment = environment.trim().to_string();
            }
        }
        config
    }
}
