//! Configuration module for the favourites backend.
//!
//! All configuration is loaded from environment variables with dev defaults.

use std::env;
use std::net::SocketAddr;

/// Fallback secret/salt for local development. `main` warns loudly whenever
/// these are in use outside the dev environment.
pub const DEV_JWT_SECRET: &str = "dev-jwt-secret";
pub const DEV_HASHING_SALT: &str = "dev-hashing-salt";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment ("dev" enables seed data)
    pub environment: String,
    /// HS256 signing secret for auth tokens
    pub jwt_secret: String,
    /// Salt prepended to passwords before hashing
    pub hashing_salt: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        let jwt_secret = env::var("JWT_SECRET_KEY").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());

        let hashing_salt =
            env::var("HASHING_SALT").unwrap_or_else(|_| DEV_HASHING_SALT.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3008".to_string())
            .parse()
            .expect("Invalid BIND_ADDR format");

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            environment,
            jwt_secret,
            hashing_salt,
            bind_addr,
            log_level,
        }
    }

    /// Whether seed data should be loaded at startup.
    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("APP_ENV");
        env::remove_var("JWT_SECRET_KEY");
        env::remove_var("HASHING_SALT");
        env::remove_var("BIND_ADDR");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.environment, "dev");
        assert!(config.is_dev());
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.hashing_salt, DEV_HASHING_SALT);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3008");
        assert_eq!(config.log_level, "info");
    }
}
