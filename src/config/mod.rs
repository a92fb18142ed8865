//! Configuration module for the storefront backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Remote auth endpoint the login request is posted to
    pub auth_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("SHOP_DB_PATH")
            .unwrap_or_else(|_| "./data/shop.sqlite".to_string())
            .into();

        let bind_addr = env::var("SHOP_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SHOP_BIND_ADDR format");

        let log_level = env::var("SHOP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let auth_url = env::var("SHOP_AUTH_URL")
            .unwrap_or_else(|_| "https://reqres.in/api/login".to_string());

        Self {
            db_path,
            bind_addr,
            log_level,
            auth_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SHOP_DB_PATH");
        env::remove_var("SHOP_BIND_ADDR");
        env::remove_var("SHOP_LOG_LEVEL");
        env::remove_var("SHOP_AUTH_URL");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/shop.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.auth_url, "https://reqres.in/api/login");
    }
}
