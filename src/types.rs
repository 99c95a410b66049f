use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const UNKNOWN_TRACK_ID: &str = "No ID";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ARTIST_ID: &str = "Unknown ID";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const NO_GENRES: &str = "No Genres";
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub tracks: Option<TrackCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackCount {
    #[serde(default)]
    pub total: Option<u64>,
}

/// One page of `GET /playlists/{id}/tracks`.
///
/// `items` stays optional: a page without it ends the collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Option<Vec<RawTrackRecord>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

/// A playlist entry exactly as the API returned it.
///
/// The entry itself or its `track` member may be `null` for removed tracks,
/// and any other field may be missing, so it is kept as loose JSON until the
/// enricher picks it apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTrackRecord(pub Value);

impl RawTrackRecord {
    /// The `track` object of the entry, if there is one.
    pub fn track(&self) -> Option<&Value> {
        match self.0.get("track") {
            Some(track) if track.is_object() => Some(track),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInfo {
    pub genres: Vec<String>,
    pub country: String,
}

impl Default for ArtistInfo {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            country: UNKNOWN_COUNTRY.to_string(),
        }
    }
}

impl From<ArtistResponse> for ArtistInfo {
    fn from(artist: ArtistResponse) -> Self {
        let mut genres: Vec<String> = Vec::new();
        for genre in artist.genres.unwrap_or_default() {
            let genre = genre.trim().to_string();
            if !genre.is_empty() && !genres.contains(&genre) {
                genres.push(genre);
            }
        }

        Self {
            genres,
            country: artist
                .country
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistMetadata {
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub followers: u64,
    pub total_tracks: u64,
}

impl PlaylistMetadata {
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}

impl From<PlaylistResponse> for PlaylistMetadata {
    fn from(playlist: PlaylistResponse) -> Self {
        Self {
            name: playlist.name.unwrap_or_default(),
            description: playlist.description.filter(|d| !d.trim().is_empty()),
            thumbnail: playlist
                .images
                .and_then(|images| images.into_iter().next())
                .map(|image| image.url),
            followers: playlist.followers.and_then(|f| f.total).unwrap_or(0),
            total_tracks: playlist.tracks.and_then(|t| t.total).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrack {
    pub name: String,
    pub id: String,
    pub artist: String,
    pub artist_id: String,
    pub album: String,
    pub release_date: String,
    pub release_year: Option<i32>,
    pub external_url: Option<String>,
    /// Numeric popularity as found in the record, `None` when absent or not a number.
    pub popularity: Option<f64>,
    pub duration_ms: Option<u64>,
    /// `None` when no artist lookup result exists for the track.
    pub genres: Option<Vec<String>>,
    pub country: String,
}

impl EnrichedTrack {
    pub fn genre_display(&self) -> String {
        match &self.genres {
            Some(genres) => genres.join(", "),
            None => NO_GENRES.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    Complete,
    Truncated { offset: u32, reason: String },
}

#[derive(Debug, Clone)]
pub struct CollectedTracks {
    pub items: Vec<RawTrackRecord>,
    pub outcome: CollectionOutcome,
    pub requests: u32,
}

impl CollectedTracks {
    pub fn is_complete(&self) -> bool {
        self.outcome == CollectionOutcome::Complete
    }
}

/// A single row of the track table with popularity already coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRow {
    pub name: String,
    pub id: String,
    pub artist: String,
    pub artist_id: String,
    pub album: String,
    pub release_date: String,
    pub release_year: Option<i32>,
    pub external_url: Option<String>,
    pub popularity: u32,
    pub duration_ms: Option<u64>,
    pub genres: String,
    pub country: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub popularity: u32,
    pub genres: String,
}

impl From<&TrackRow> for TrackTableRow {
    fn from(row: &TrackRow) -> Self {
        Self {
            name: row.name.clone(),
            artist: row.artist.clone(),
            album: row.album.clone(),
            year: row
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            popularity: row.popularity,
            genres: row.genres.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct CountTableRow {
    pub label: String,
    pub count: usize,
    pub bar: String,
}
