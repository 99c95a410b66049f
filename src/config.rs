//! Configuration management for the Spotify Playlist Dashboard.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials are required; every other
//! setting falls back to a default.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::errors::ConfigError;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";

/// Largest page the playlist tracks endpoint hands out.
pub const PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 100;
/// 100 pages of 100 entries covers Spotify's 10 000 track playlist limit.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `playlistdash/.env`. A missing file is not an
/// error: the variables may just as well come from the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/playlistdash/.env`
/// - macOS: `~/Library/Application Support/playlistdash/.env`
/// - Windows: `%LOCALAPPDATA%/playlistdash/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::InvalidValue {
            name: ".env",
            value: e.to_string(),
        })?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlistdash/.env");
    path
}

/// Application credentials for the client-credentials token exchange.
///
/// Constructing them is the startup gate of the application: without both
/// values no API call is ever attempted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
}

impl Credentials {
    /// Reads `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET`,
    /// plus the optional `SPOTIFY_API_URL` and `SPOTIFY_API_TOKEN_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] naming the first absent or blank
    /// credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required_var("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required_var("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            api_url: spotify_apiurl(),
            token_url: spotify_apitoken_url(),
        })
    }
}

/// Settings steering the paginated track collector.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    pub page_size: u32,
    pub page_delay: Duration,
    pub max_pages: u32,
    pub warn_on_partial: bool,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
            warn_on_partial: false,
        }
    }
}

impl CollectorSettings {
    /// Builds the settings from `PLAYLIST_PAGE_DELAY_MS`, `PLAYLIST_MAX_PAGES`
    /// and `PLAYLIST_WARN_ON_PARTIAL`. Unparsable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            page_size: PAGE_SIZE,
            page_delay: parsed_var::<u64>("PLAYLIST_PAGE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.page_delay),
            max_pages: parsed_var::<u32>("PLAYLIST_MAX_PAGES")
                .filter(|pages| *pages > 0)
                .unwrap_or(defaults.max_pages),
            warn_on_partial: env::var("PLAYLIST_WARN_ON_PARTIAL")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.warn_on_partial),
        }
    }
}

/// Returns the address the dashboard server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:8501`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when the value is not a socket address.
pub fn server_addr() -> Result<SocketAddr, ConfigError> {
    let raw = env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string());
    parse_server_addr(&raw)
}

pub fn parse_server_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    SocketAddr::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
        name: "SERVER_ADDRESS",
        value: raw.to_string(),
    })
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, defaulting to
/// `https://api.spotify.com/v1`. A trailing slash is removed.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn parses_server_address() {
        let addr = parse_server_addr("127.0.0.1:8501").unwrap();
        assert_eq!(addr.port(), 8501);
        assert!(parse_server_addr("localhost").is_err());
    }

    #[test]
    fn default_collector_settings_match_api_limits() {
        let settings = CollectorSettings::default();
        assert_eq!(settings.page_size, 100);
        assert_eq!(settings.page_delay, Duration::from_millis(100));
        assert_eq!(settings.max_pages, 100);
        assert!(!settings.warn_on_partial);
    }
}
