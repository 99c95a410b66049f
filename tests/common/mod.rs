#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use playlistdash::{
    Res,
    config::CollectorSettings,
    spotify::CatalogApi,
    types::{ArtistResponse, PlaylistResponse, PlaylistTracksPage, RawTrackRecord},
};
use serde_json::{Value, json};

/// In-memory catalog serving a single playlist.
#[derive(Default)]
pub struct FakeCatalog {
    pub metadata: Option<Value>,
    pub entries: Vec<Value>,
    /// Page requests at this offset fail.
    pub fail_at_offset: Option<u32>,
    /// Page requests at this offset return a body without `items`.
    pub missing_items_at_offset: Option<u32>,
    /// Page requests at this offset return a `null` body.
    pub null_page_at_offset: Option<u32>,
    /// Artists not listed here fail to load.
    pub artists: HashMap<String, Value>,
    pub page_requests: AtomicU32,
    pub page_request_times: Mutex<Vec<Instant>>,
    pub artist_requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_entries(entries: Vec<Value>) -> Self {
        let total = entries.len();
        Self {
            metadata: Some(json!({"name": "Fake", "tracks": {"total": total}})),
            entries,
            ..Default::default()
        }
    }

    pub fn with_artist(mut self, id: &str, genres: &[&str]) -> Self {
        self.artists
            .insert(id.to_string(), json!({"id": id, "name": id, "genres": genres}));
        self
    }

    pub fn page_requests(&self) -> u32 {
        self.page_requests.load(Ordering::SeqCst)
    }

    pub fn page_request_times(&self) -> Vec<Instant> {
        self.page_request_times.lock().unwrap().clone()
    }

    pub fn artist_requests(&self) -> Vec<String> {
        self.artist_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn playlist(&self, _playlist_id: &str) -> Res<PlaylistResponse> {
        match &self.metadata {
            Some(metadata) => Ok(serde_json::from_value(metadata.clone())?),
            None => Err("404 Not Found".into()),
        }
    }

    async fn playlist_tracks(
        &self,
        _playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Option<PlaylistTracksPage>> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        self.page_request_times.lock().unwrap().push(Instant::now());

        if self.fail_at_offset == Some(offset) {
            return Err("502 Bad Gateway".into());
        }
        if self.null_page_at_offset == Some(offset) {
            return Ok(None);
        }
        if self.missing_items_at_offset == Some(offset) {
            return Ok(Some(PlaylistTracksPage::default()));
        }

        let start = (offset as usize).min(self.entries.len());
        let end = (start + limit as usize).min(self.entries.len());
        let items: Vec<RawTrackRecord> = self.entries[start..end]
            .iter()
            .cloned()
            .map(RawTrackRecord)
            .collect();

        Ok(Some(PlaylistTracksPage {
            items: Some(items),
            total: Some(self.entries.len() as u64),
            next: (end < self.entries.len()).then(|| format!("offset={}", end)),
        }))
    }

    async fn artist(&self, artist_id: &str) -> Res<ArtistResponse> {
        self.artist_requests
            .lock()
            .unwrap()
            .push(artist_id.to_string());
        match self.artists.get(artist_id) {
            Some(artist) => Ok(serde_json::from_value(artist.clone())?),
            None => Err("429 Too Many Requests".into()),
        }
    }
}

pub fn settings() -> CollectorSettings {
    CollectorSettings {
        page_delay: Duration::ZERO,
        ..CollectorSettings::default()
    }
}

pub fn track_entry(index: usize, artist_id: &str, popularity: Value, release_date: &str) -> Value {
    json!({
        "added_at": "2024-01-01T00:00:00Z",
        "track": {
            "id": format!("t{}", index),
            "name": format!("Track {}", index),
            "popularity": popularity,
            "duration_ms": 180000,
            "artists": [{"id": artist_id, "name": format!("Artist {}", artist_id)}],
            "album": {"name": format!("Album {}", index), "release_date": release_date},
            "external_urls": {"spotify": format!("https://open.spotify.com/track/t{}", index)}
        }
    })
}

pub fn entries(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| track_entry(i, "a1", json!(50), "2020-01-01"))
        .collect()
}

pub const LINK: &str = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123";
