use reqwest::Client;

use crate::types::ArtistResponse;

/// Retrieves a single artist from the Spotify Web API.
///
/// Uses `GET /artists/{id}`. Only the genres are of interest to the dashboard;
/// the endpoint does not expose a country, which therefore stays "Unknown"
/// further down the line.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `api_url` - Base URL of the Web API
/// * `token` - Valid access token
/// * `artist_id` - Spotify ID of the artist
///
/// # Errors
///
/// Network failures, non-success status codes (unknown id, rate limiting) and
/// undecodable bodies are returned as `reqwest::Error`. No retry is attempted.
pub async fn get_artist(
    http: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
) -> Result<ArtistResponse, reqwest::Error> {
    let api_url = format!("{uri}/artists/{id}", uri = api_url, id = artist_id);

    http.get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json::<ArtistResponse>()
        .await
}
