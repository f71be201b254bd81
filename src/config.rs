//! Configuration management for spotlog.
//!
//! Values come from environment variables, optionally seeded from `.env` files.
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Everything is read once into a [`Config`] at startup. Missing credentials are
//! reported as [`ConfigError`] before any listener or loop is started.

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::error::ConfigError;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
pub const INGEST_API_KEY_VAR: &str = "DATADOG_API_KEY";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";
pub const DEFAULT_SCOPE: &str = "user-top-read user-read-recently-played";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_INGEST_URL: &str = "https://http-intake.logs.datadoghq.com/v1/input";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_HOST: &str = "spotlog";

/// Fixed page size for every data API request.
pub const PAGE_SIZE: u32 = 50;

/// Loads environment variables from `.env` files.
///
/// Looks in the platform-specific local data directory under `spotlog/.env`
/// first, then in the working directory. Variables already present in the
/// process environment are never overwritten, and a missing file is not an
/// error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotlog/.env`
/// - macOS: `~/Library/Application Support/spotlog/.env`
/// - Windows: `%LOCALAPPDATA%/spotlog/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotlog/.env");
    path
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub ingest_api_key: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: Url,
    pub ingest_url: Url,
    pub server_addr: SocketAddr,
    pub poll_interval: Duration,
    pub max_wait: Option<Duration>,
    pub log_host: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary lookup function.
    ///
    /// Empty values count as unset, so `SPOTIFY_CLIENT_ID=` in a `.env` file
    /// is reported as missing rather than accepted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let url = |key: &'static str, default: &str| -> Result<Url, ConfigError> {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| ConfigError::invalid(key, e))
        };
        let seconds = |key: &'static str| -> Result<Option<Duration>, ConfigError> {
            match get(key) {
                None => Ok(None),
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(0) => Err(ConfigError::invalid(key, "must be greater than zero")),
                    Ok(secs) => Ok(Some(Duration::from_secs(secs))),
                    Err(e) => Err(ConfigError::invalid(key, e)),
                },
            }
        };

        let client_id = required(CLIENT_ID_VAR)?;
        let client_secret = required(CLIENT_SECRET_VAR)?;
        let ingest_api_key = required(INGEST_API_KEY_VAR)?;

        let server_addr = get("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("SERVER_ADDRESS", e))?;

        Ok(Self {
            client_id,
            client_secret,
            ingest_api_key,
            redirect_uri: get("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: get("SPOTIFY_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: url("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)?,
            token_url: url("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            api_url: url("SPOTIFY_API_URL", DEFAULT_API_URL)?,
            ingest_url: url("DATADOG_INTAKE_URL", DEFAULT_INGEST_URL)?,
            server_addr,
            poll_interval: seconds("POLL_INTERVAL_SECS")?
                .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
            max_wait: seconds("MAX_WAIT_SECS")?,
            log_host: get("LOG_HOST").unwrap_or_else(|| DEFAULT_LOG_HOST.to_string()),
        })
    }
}
