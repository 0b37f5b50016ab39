//! Gateway configuration.

use std::env;

use auth_service_lib::AuthServiceConfig;
use common::{parse_env, DatabaseConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Shared connection pool settings
    pub database: DatabaseConfig,
    /// Token and notification settings for the credential service
    pub auth: AuthServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("GATEWAY_PORT").unwrap_or(3000),
            database: DatabaseConfig::from_env(),
            auth: AuthServiceConfig::from_env(),
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database: DatabaseConfig::default(),
            auth: AuthServiceConfig::default(),
        }
    }
}
