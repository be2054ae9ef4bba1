//! Centralized configuration management for billed

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the bills API
    pub api_url: String,
    /// Path to the SQLite file backing the local session store
    pub session_db_path: PathBuf,
    /// Width of the receipt overlay in pixels
    pub overlay_width: u32,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "billed/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678".to_string(),
            session_db_path: "./billed.db".into(),
            overlay_width: 800,
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let api_url = std::env::var("BILLED_API_URL").unwrap_or(defaults.api_url);

        let session_db_path = std::env::var("BILLED_SESSION_DB")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_db_path);

        let overlay_width =
            parse_env_var("BILLED_OVERLAY_WIDTH")?.unwrap_or(defaults.overlay_width);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("BILLED_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: std::env::var("BILLED_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            api_url,
            session_db_path,
            overlay_width,
            http,
        })
    }

    /// Get session database path as string
    pub fn session_db_path_str(&self) -> &str {
        self.session_db_path.to_str().unwrap_or("./billed.db")
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            ));
        }

        if let Some(parent) = self.session_db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Session database parent directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        if self.overlay_width == 0 {
            return Err(anyhow::anyhow!("Overlay width must be greater than zero"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5678");
        assert_eq!(config.session_db_path_str(), "./billed.db");
        assert_eq!(config.overlay_width, 800);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let mut bad_url = Config::default();
        bad_url.api_url = "localhost:5678".to_string();
        assert!(bad_url.validate().is_err());

        let mut missing_dir = Config::default();
        missing_dir.session_db_path = "/definitely/not/here/billed.db".into();
        assert!(missing_dir.validate().is_err());
    }
}
