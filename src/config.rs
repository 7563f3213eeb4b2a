//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Eventure API (e.g. `http://10.0.2.2:4000`)
    pub api_url: String,
    /// Path of the persisted session file
    pub session_file: PathBuf,
    /// Platform tag sent with cover uploads
    pub upload_platform: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000".to_string(),
            session_file: PathBuf::from(".eventure-session.json"),
            upload_platform: "android".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: env::var("EVENTURE_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("EVENTURE_API_URL"))?,
            session_file: env::var("EVENTURE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
            upload_platform: env::var("EVENTURE_UPLOAD_PLATFORM")
                .unwrap_or_else(|_| "android".to_string()),
            request_timeout_secs: env::var("EVENTURE_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}

fn default_session_file() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".eventure").join("session.json"),
        Err(_) => PathBuf::from(".eventure-session.json"),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
