//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API. It covers
//! the three read-only catalog endpoints the dashboard consumes and the
//! client-credentials token exchange that authorizes them.
//!
//! ## Architecture
//!
//! ```text
//! Report Pipeline (management)
//!          ↓
//! CatalogApi trait
//!          ↓
//! SpotifyClient
//!     ├── Authentication (client credentials, token renewal)
//!     ├── Playlist Operations (metadata, paginated entries)
//!     └── Artist Operations (genres)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline only sees [`CatalogApi`], which lets tests drive the collector
//! and the enricher with an in-memory catalog.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token exchange
//! - `GET /playlists/{id}` - Playlist metadata
//! - `GET /playlists/{id}/tracks` - Playlist entries, offset/limit pagination
//! - `GET /artists/{id}` - Artist genres
//!
//! ## Error Handling
//!
//! Every call returns the crate's boxed [`Res`] type. Non-success status codes
//! are turned into errors right away; there is no retry or backoff here, the
//! callers decide how much of a failure they tolerate.

pub mod artists;
pub mod auth;
pub mod playlist;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::Credentials,
    errors::ConfigError,
    management::TokenManager,
    types::{ArtistResponse, PlaylistResponse, PlaylistTracksPage},
};

/// Read access to the parts of the music catalog the dashboard needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn playlist(&self, playlist_id: &str) -> Res<PlaylistResponse>;

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Option<PlaylistTracksPage>>;

    async fn artist(&self, artist_id: &str) -> Res<ArtistResponse>;
}

/// Spotify Web API client authorized with application credentials.
///
/// Constructed once at startup and passed to whoever needs catalog access.
/// The bearer token is fetched lazily and renewed when it is about to expire.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Builds the client from already validated credentials.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::MissingVar`] when the id or the secret is
    /// blank, or with [`ConfigError::Http`] when the HTTP client cannot be
    /// built.
    pub fn connect(credentials: Credentials) -> Result<Self, ConfigError> {
        if credentials.client_id.trim().is_empty() {
            return Err(ConfigError::MissingVar("SPOTIFY_API_AUTH_CLIENT_ID"));
        }
        if credentials.client_secret.trim().is_empty() {
            return Err(ConfigError::MissingVar("SPOTIFY_API_AUTH_CLIENT_SECRET"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            api_url: credentials.api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(TokenManager::new(credentials)),
        })
    }

    /// Fetches a token right away so bad credentials surface at startup.
    pub async fn authenticate(&self) -> Res<()> {
        self.bearer().await.map(|_| ())
    }

    async fn bearer(&self) -> Res<String> {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.http).await
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn playlist(&self, playlist_id: &str) -> Res<PlaylistResponse> {
        let token = self.bearer().await?;
        Ok(playlist::get_playlist(&self.http, &self.api_url, &token, playlist_id).await?)
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Option<PlaylistTracksPage>> {
        let token = self.bearer().await?;
        Ok(playlist::get_playlist_tracks(
            &self.http,
            &self.api_url,
            &token,
            playlist_id,
            offset,
            limit,
        )
        .await?)
    }

    async fn artist(&self, artist_id: &str) -> Res<ArtistResponse> {
        let token = self.bearer().await?;
        Ok(artists::get_artist(&self.http, &self.api_url, &token, artist_id).await?)
    }
}
