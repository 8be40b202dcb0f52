//! Configuration management for the Farm Operations Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FARMOPS_ prefix

use chrono::{FixedOffset, Offset, Utc};
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Time clock configuration
    pub time_clock: TimeClockConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimeClockConfig {
    /// Offset of the farm's local time from UTC; decides which calendar
    /// day a clock-in belongs to
    pub utc_offset_minutes: i32,
}

impl TimeClockConfig {
    /// Falls back to UTC when the configured offset is out of range
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid time_clock.utc_offset_minutes {}, using UTC",
                self.utc_offset_minutes
            );
            Utc.fix()
        })
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARMOPS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("time_clock.utc_offset_minutes", 0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMOPS_ prefix)
            .add_source(
                Environment::with_prefix("FARMOPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for TimeClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_minutes() {
        let config = TimeClockConfig {
            utc_offset_minutes: -300,
        };
        assert_eq!(config.offset().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let config = TimeClockConfig {
            utc_offset_minutes: 24 * 60,
        };
        assert_eq!(config.offset().local_minus_utc(), 0);
    }
}
