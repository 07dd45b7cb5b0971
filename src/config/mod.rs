//! Configuration module for the CMDB console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::errors::AppError;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the CMDB REST API, without a trailing slash
    pub api_url: String,
    /// Address to bind the console to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = normalize_api_url(
            &env::var("CMDB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;

        let raw_bind = env::var("CMDB_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_bind
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid CMDB_BIND_ADDR {:?}: {}", raw_bind, e)))?;

        let log_level = env::var("CMDB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("CMDB_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            api_url,
            bind_addr,
            log_level,
            log_json,
        })
    }
}

/// Validate the scheme and strip trailing slashes so paths can be appended directly.
fn normalize_api_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "CMDB_API_URL must start with http:// or https://, got {:?}",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("CMDB_API_URL");
        env::remove_var("CMDB_BIND_ADDR");
        env::remove_var("CMDB_LOG_LEVEL");
        env::remove_var("CMDB_LOG_FORMAT");

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_api_url_trailing_slash_stripped() {
        assert_eq!(
            normalize_api_url("https://cmdb.internal/").unwrap(),
            "https://cmdb.internal"
        );
    }

    #[test]
    fn test_api_url_requires_http_scheme() {
        let err = normalize_api_url("cmdb.internal:8000").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
