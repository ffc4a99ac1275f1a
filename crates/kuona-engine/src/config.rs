//! Configuration for feature extraction and backtesting

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest calendar-day buffer that still covers a long weekend plus a holiday
pub const MIN_PRICE_BUFFER_DAYS: u32 = 5;

/// Configuration for the earnings engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Forward return horizons in calendar days
    pub horizons: Vec<u32>,

    /// Extra calendar days fetched past the furthest horizon
    pub price_buffer_days: u32,

    /// Horizon used by the backtest when none is requested
    pub backtest_horizon: u32,

    /// Lifetime of cached price series
    pub price_cache_ttl: Duration,

    /// Upper bound on concurrent price fetches in bulk operations
    pub max_concurrent_fetches: usize,

    /// Price provider requests allowed per minute
    pub rate_limit_per_minute: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizons: vec![1, 3, 5],
            price_buffer_days: MIN_PRICE_BUFFER_DAYS,
            backtest_horizon: 3,
            price_cache_ttl: Duration::from_secs(3600), // 1 hour
            max_concurrent_fetches: 4,
            rate_limit_per_minute: 60,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_horizons(&self.horizons)?;

        if self.backtest_horizon == 0 {
            return Err(EngineError::ConfigError(
                "backtest_horizon must be greater than 0".to_string(),
            ));
        }

        if self.price_buffer_days < MIN_PRICE_BUFFER_DAYS {
            return Err(EngineError::ConfigError(format!(
                "price_buffer_days must be at least {MIN_PRICE_BUFFER_DAYS}"
            )));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(EngineError::ConfigError(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(EngineError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Configured horizons plus `extra`, deduplicated and sorted
    pub fn horizons_with(&self, extra: u32) -> Vec<u32> {
        let mut horizons = self.horizons.clone();
        horizons.push(extra);
        horizons.sort_unstable();
        horizons.dedup();
        horizons
    }
}

/// Reject empty horizon sets and non-positive horizons
pub fn validate_horizons(horizons: &[u32]) -> Result<()> {
    if horizons.is_empty() {
        return Err(EngineError::ConfigError(
            "at least one horizon is required".to_string(),
        ));
    }
    if horizons.contains(&0) {
        return Err(EngineError::ConfigError(
            "horizons must be positive day offsets".to_string(),
        ));
    }
    Ok(())
}

/// Parse a comma separated horizon list such as `1,3,5`
pub fn parse_horizons(value: &str) -> Result<Vec<u32>> {
    let horizons = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.trim_end_matches(['d', 'D'])
                .parse::<u32>()
                .map_err(|_| EngineError::InvalidParameter(format!("invalid horizon '{part}'")))
        })
        .collect::<Result<Vec<u32>>>()?;

    validate_horizons(&horizons)?;
    Ok(horizons)
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    horizons: Option<Vec<u32>>,
    price_buffer_days: Option<u32>,
    backtest_horizon: Option<u32>,
    price_cache_ttl: Option<Duration>,
    max_concurrent_fetches: Option<usize>,
    rate_limit_per_minute: Option<u32>,
    env_error: Option<EngineError>,
}

impl EngineConfigBuilder {
    /// Set the forward return horizons
    pub fn horizons(mut self, horizons: impl Into<Vec<u32>>) -> Self {
        self.horizons = Some(horizons.into());
        self
    }

    /// Set the calendar-day buffer past the furthest horizon
    pub fn price_buffer_days(mut self, days: u32) -> Self {
        self.price_buffer_days = Some(days);
        self
    }

    /// Set the default backtest horizon
    pub fn backtest_horizon(mut self, horizon: u32) -> Self {
        self.backtest_horizon = Some(horizon);
        self
    }

    /// Set price cache TTL
    pub fn price_cache_ttl(mut self, duration: Duration) -> Self {
        self.price_cache_ttl = Some(duration);
        self
    }

    /// Set the bulk fetch concurrency
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = Some(limit);
        self
    }

    /// Set the provider rate limit
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Load overrides from `KUONA_HORIZONS`, `KUONA_BUFFER_DAYS` and
    /// `KUONA_BACKTEST_HORIZON`
    ///
    /// Malformed values surface as an error from [`build`](Self::build).
    pub fn with_env(mut self) -> Self {
        if let Ok(value) = std::env::var("KUONA_HORIZONS") {
            match parse_horizons(&value) {
                Ok(horizons) => self.horizons = Some(horizons),
                Err(e) => self.env_error = Some(e),
            }
        }
        if let Ok(value) = std::env::var("KUONA_BUFFER_DAYS") {
            match value.trim().parse() {
                Ok(days) => self.price_buffer_days = Some(days),
                Err(_) => {
                    self.env_error = Some(EngineError::ConfigError(format!(
                        "KUONA_BUFFER_DAYS is not a number: {value}"
                    )));
                }
            }
        }
        if let Ok(value) = std::env::var("KUONA_BACKTEST_HORIZON") {
            match value.trim().parse() {
                Ok(horizon) => self.backtest_horizon = Some(horizon),
                Err(_) => {
                    self.env_error = Some(EngineError::ConfigError(format!(
                        "KUONA_BACKTEST_HORIZON is not a number: {value}"
                    )));
                }
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        if let Some(err) = self.env_error {
            return Err(err);
        }

        let defaults = EngineConfig::default();

        let config = EngineConfig {
            horizons: self.horizons.unwrap_or(defaults.horizons),
            price_buffer_days: self.price_buffer_days.unwrap_or(defaults.price_buffer_days),
            backtest_horizon: self.backtest_horizon.unwrap_or(defaults.backtest_horizon),
            price_cache_ttl: self.price_cache_ttl.unwrap_or(defaults.price_cache_ttl),
            max_concurrent_fetches: self
                .max_concurrent_fetches
                .unwrap_or(defaults.max_concurrent_fetches),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
        };

        config.validate()?;
        Ok(config)
    }
}
