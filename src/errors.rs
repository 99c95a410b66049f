//! Errors surfaced to the user of the dashboard.
//!
//! Only input validation and metadata failures reach the user as an error.
//! Empty results are a regular report. Per-page and per-track failures are absorbed
//! by the collector and the enricher and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("please enter a valid Spotify playlist link: {0}")]
    InvalidLink(String),
    #[error("could not retrieve playlist info: {0}")]
    MetadataUnavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set in the environment variables")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("http client error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for ConfigError {
    fn from(e: reqwest::Error) -> Self {
        ConfigError::Http(e.to_string())
    }
}
