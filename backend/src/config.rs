//! Configuration management for the Ranch Irrigation Scheduler
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with IRR_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DepthFormula;
use std::net::{AddrParseError, SocketAddr};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Irrigation calculation settings
    pub irrigation: IrrigationConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
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
pub struct IrrigationConfig {
    /// Formula used for depth requests on crop-x blocks
    pub depth_formula: DepthFormula,

    /// Days before today covered by a report when no range is given
    pub report_default_days: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("IRR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("irrigation.depth_formula", "per_block_flow")?
            .set_default("irrigation.report_default_days", 7)?
            .set_default("weather.api_endpoint", "https://api.davissystems.com/weather")?
            .set_default("weather.api_key", "")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IRR_ prefix)
            .add_source(
                Environment::with_prefix("IRR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    /// Address the server listens on
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_uses_configured_host() {
        let server = ServerConfig {
            port: 8080,
            host: "127.0.0.1".to_string(),
        };

        assert_eq!(server.socket_addr().unwrap(), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }

    #[test]
    fn test_socket_addr_rejects_bad_host() {
        let server = ServerConfig {
            port: 8080,
            host: "not a host".to_string(),
        };

        assert!(server.socket_addr().is_err());
    }
}
