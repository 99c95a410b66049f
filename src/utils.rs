use serde_json::Value;

use crate::errors::DashboardError;

/// Substring every shareable playlist link carries.
pub const PLAYLIST_LINK_MARKER: &str = "spotify.com/playlist/";

pub fn is_playlist_link(link: &str) -> bool {
    link.contains(PLAYLIST_LINK_MARKER)
}

/// Extracts the playlist id from a shareable link.
///
/// Takes the path segment after the last `/` and strips the query string
/// (and a fragment, should one be present). `https://open.spotify.com/playlist/37i9?si=abc`
/// yields `37i9`.
pub fn parse_playlist_id(link: &str) -> Result<String, DashboardError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(DashboardError::InvalidLink("the link is empty".to_string()));
    }

    let last_segment = link.rsplit('/').next().unwrap_or_default();
    let id = last_segment
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    if id.is_empty() {
        return Err(DashboardError::InvalidLink(format!(
            "no playlist id found in {}",
            link
        )));
    }

    Ok(id.to_string())
}

/// Derives the release year from an album release date.
///
/// Spotify dates come as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; only the first
/// four characters matter and they have to be digits.
pub fn release_year(release_date: &str) -> Option<i32> {
    let prefix: String = release_date.trim().chars().take(4).collect();
    if prefix.chars().count() != 4 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<i32>().ok()
}

/// Reads a popularity value leniently: JSON numbers and numeric strings count.
pub fn popularity_value(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Coerces a popularity to the 0..=100 integer scale, missing values become 0.
pub fn coerce_popularity(popularity: Option<f64>) -> u32 {
    match popularity {
        Some(p) if p.is_finite() => p.round().clamp(0.0, 100.0) as u32,
        _ => 0,
    }
}

/// Non-empty string member of a JSON object.
pub fn json_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn format_duration(total_ms: u64) -> String {
    let total_seconds = total_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}
