use crate::{
    types::{EnrichedTrack, NO_GENRES, TrackRow},
    utils,
};

/// Ordered rows of a playlist, ready for rendering.
///
/// Every row carries a numeric popularity: whatever could not be read as a
/// number has been coerced to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackTable {
    rows: Vec<TrackRow>,
}

impl TrackTable {
    /// Builds the table, or `None` when there is nothing to show.
    pub fn assemble(tracks: Vec<EnrichedTrack>) -> Option<Self> {
        if tracks.is_empty() {
            return None;
        }

        let rows = tracks
            .into_iter()
            .map(|track| TrackRow {
                genres: track.genre_display(),
                popularity: utils::coerce_popularity(track.popularity),
                name: track.name,
                id: track.id,
                artist: track.artist,
                artist_id: track.artist_id,
                album: track.album,
                release_date: track.release_date,
                release_year: track.release_year,
                external_url: track.external_url,
                duration_ms: track.duration_ms,
                country: track.country,
            })
            .collect();

        Some(Self { rows })
    }

    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn popularity(&self) -> Vec<u32> {
        self.rows.iter().map(|row| row.popularity).collect()
    }

    pub fn release_years(&self) -> Vec<i32> {
        self.rows.iter().filter_map(|row| row.release_year).collect()
    }

    /// All genre strings of the table separated by spaces, without the
    /// "No Genres" marker.
    pub fn genre_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.genres.trim())
            .filter(|genres| !genres.is_empty() && *genres != NO_GENRES)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.rows.iter().filter_map(|row| row.duration_ms).sum()
    }
}
