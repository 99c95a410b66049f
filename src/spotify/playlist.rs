use reqwest::Client;

use crate::types::{PlaylistResponse, PlaylistTracksPage};

/// Retrieves the metadata of a public playlist.
///
/// Uses `GET /playlists/{id}` restricted to the fields the dashboard shows,
/// which keeps the response small for playlists with many tracks.
///
/// # Errors
///
/// Returns a `reqwest::Error` for network failures, unknown playlists (404),
/// missing permissions (401/403) and undecodable responses.
pub async fn get_playlist(
    http: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
) -> Result<PlaylistResponse, reqwest::Error> {
    let api_url = format!("{uri}/playlists/{id}", uri = api_url, id = playlist_id);

    http.get(&api_url)
        .bearer_auth(token)
        .query(&[(
            "fields",
            "id,name,description,images(url),followers(total),tracks(total)",
        )])
        .send()
        .await?
        .error_for_status()?
        .json::<PlaylistResponse>()
        .await
}

/// Retrieves one page of playlist entries.
///
/// Uses `GET /playlists/{id}/tracks` with offset based pagination. A `null`
/// body is returned as `Ok(None)` so the caller can tell an absent page from
/// a failed request.
///
/// # Arguments
///
/// * `offset` - Index of the first entry of the page
/// * `limit` - Page size, at most 100
pub async fn get_playlist_tracks(
    http: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    offset: u32,
    limit: u32,
) -> Result<Option<PlaylistTracksPage>, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = api_url,
        id = playlist_id
    );

    http.get(&api_url)
        .bearer_auth(token)
        .query(&[
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
            ("additional_types", "track".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<Option<PlaylistTracksPage>>()
        .await
}
