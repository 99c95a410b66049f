use std::collections::HashMap;

use serde_json::Value;

use crate::{
    spotify::CatalogApi,
    types::{
        ArtistInfo, EnrichedTrack, RawTrackRecord, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
        UNKNOWN_ARTIST_ID, UNKNOWN_COUNTRY, UNKNOWN_TRACK, UNKNOWN_TRACK_ID,
    },
    utils, warning,
};

/// Request-scoped memo of artist lookups.
///
/// Each distinct artist id hits the API at most once per report. Failed
/// lookups are remembered as well.
#[derive(Default)]
pub struct ArtistInfoManager {
    lookups: HashMap<String, Option<ArtistInfo>>,
}

impl ArtistInfoManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&mut self, api: &dyn CatalogApi, artist_id: &str) -> Option<ArtistInfo> {
        if let Some(known) = self.lookups.get(artist_id) {
            return known.clone();
        }

        let info = match api.artist(artist_id).await {
            Ok(artist) => Some(ArtistInfo::from(artist)),
            Err(e) => {
                warning!("Error fetching artist info for {}: {}", artist_id, e);
                None
            }
        };

        self.lookups.insert(artist_id.to_string(), info.clone());
        info
    }

    pub fn count_lookups(&self) -> usize {
        self.lookups.len()
    }
}

/// Turns raw playlist entries into dashboard rows, one artist lookup per track.
#[derive(Default)]
pub struct TrackEnricher {
    artists: ArtistInfoManager,
}

impl TrackEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enriches every usable entry, keeping the playlist order.
    ///
    /// Null entries and entries without a track object are skipped.
    pub async fn enrich_all(
        &mut self,
        api: &dyn CatalogApi,
        records: &[RawTrackRecord],
    ) -> Vec<EnrichedTrack> {
        let mut tracks = Vec::with_capacity(records.len());
        for record in records {
            if let Some(track) = self.enrich(api, record).await {
                tracks.push(track);
            }
        }
        tracks
    }

    pub async fn enrich(
        &mut self,
        api: &dyn CatalogApi,
        record: &RawTrackRecord,
    ) -> Option<EnrichedTrack> {
        let track = record.track()?;

        let artist = match primary_artist_id(track) {
            Some(artist_id) => self.artists.get(api, artist_id).await,
            None => None,
        };

        Some(extract_track(track, artist))
    }

    pub fn artist_lookups(&self) -> usize {
        self.artists.count_lookups()
    }
}

fn primary_artist(track: &Value) -> Option<&Value> {
    track
        .get("artists")
        .and_then(Value::as_array)
        .and_then(|artists| artists.first())
}

fn primary_artist_id(track: &Value) -> Option<&str> {
    primary_artist(track).and_then(|artist| utils::json_str(artist, "id"))
}

/// Builds the row for one track object, filling every gap with a placeholder.
pub fn extract_track(track: &Value, artist_info: Option<ArtistInfo>) -> EnrichedTrack {
    let artist = primary_artist(track);
    let album = track.get("album").filter(|a| a.is_object());

    let release_date = album
        .and_then(|a| utils::json_str(a, "release_date"))
        .unwrap_or_default()
        .to_string();

    let (genres, country) = match artist_info {
        Some(info) => (Some(info.genres), info.country),
        None => (None, UNKNOWN_COUNTRY.to_string()),
    };

    EnrichedTrack {
        name: utils::json_str(track, "name")
            .unwrap_or(UNKNOWN_TRACK)
            .to_string(),
        id: utils::json_str(track, "id")
            .unwrap_or(UNKNOWN_TRACK_ID)
            .to_string(),
        artist: artist
            .and_then(|a| utils::json_str(a, "name"))
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string(),
        artist_id: artist
            .and_then(|a| utils::json_str(a, "id"))
            .unwrap_or(UNKNOWN_ARTIST_ID)
            .to_string(),
        album: album
            .and_then(|a| utils::json_str(a, "name"))
            .unwrap_or(UNKNOWN_ALBUM)
            .to_string(),
        release_year: utils::release_year(&release_date),
        release_date,
        external_url: track
            .get("external_urls")
            .and_then(|urls| utils::json_str(urls, "spotify"))
            .map(str::to_string),
        popularity: utils::popularity_value(track.get("popularity")),
        duration_ms: track.get("duration_ms").and_then(Value::as_u64),
        genres,
        country,
    }
}
