use chrono::Utc;
use reqwest::Client;

use crate::{
    config::Credentials,
    types::{Token, TokenResponse},
};

/// Obtains an application access token through the client-credentials grant.
///
/// Posts `grant_type=client_credentials` to the token endpoint, authenticating
/// with the client id and secret as HTTP Basic credentials. The resulting token
/// only grants access to public catalog data, which is all the dashboard needs.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `credentials` - Client id, secret and token endpoint
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Access token with its lifetime and the time it was obtained
/// - `Err(reqwest::Error)` - Network error, rejected credentials or malformed response
///
/// # Example
///
/// ```
/// let credentials = config::Credentials::from_env()?;
/// let token = request_client_token(&Client::new(), &credentials).await?;
/// println!("Token valid for {} seconds", token.expires_in);
/// ```
pub async fn request_client_token(
    http: &Client,
    credentials: &Credentials,
) -> Result<Token, reqwest::Error> {
    let res = http
        .post(&credentials.token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenResponse>().await?;

    Ok(Token {
        access_token: json.access_token,
        token_type: json.token_type.unwrap_or_else(|| "Bearer".to_string()),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
