use chrono::Utc;
use reqwest::Client;

use crate::{Res, config::Credentials, spotify, types::Token};

/// Seconds before the real expiry at which a token is already renewed.
const EXPIRY_MARGIN_SECS: u64 = 240;
/// Short-lived tokens are renewed after this share of their lifetime at most.
const EXPIRY_MARGIN_DIVISOR: u64 = 4;

pub struct TokenManager {
    credentials: Credentials,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(credentials: Credentials) -> Self {
        TokenManager {
            credentials,
            token: None,
        }
    }

    /// Returns the cached access token, or exchanges the credentials for a new
    /// one when there is none yet or it is about to expire.
    pub async fn get_valid_token(&mut self, http: &Client) -> Res<String> {
        if let Some(token) = &self.token {
            if !Self::is_expired(token, Utc::now().timestamp() as u64) {
                return Ok(token.access_token.clone());
            }
        }

        let token = spotify::auth::request_client_token(http, &self.credentials).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    fn is_expired(token: &Token, now: u64) -> bool {
        let margin = EXPIRY_MARGIN_SECS.min(token.expires_in / EXPIRY_MARGIN_DIVISOR);
        now + margin >= token.obtained_at + token.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "BQC".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn fresh_token_is_not_expired() {
        assert!(!TokenManager::is_expired(&token(1_000, 3_600), 1_000));
    }

    #[test]
    fn token_is_renewed_within_margin() {
        let t = token(1_000, 3_600);
        assert!(!TokenManager::is_expired(&t, 1_000 + 3_600 - 241));
        assert!(TokenManager::is_expired(&t, 1_000 + 3_600 - 240));
        assert!(TokenManager::is_expired(&t, 1_000 + 3_600 + 10));
    }

    #[test]
    fn short_lived_token_is_reused_before_expiry() {
        let t = token(1_000, 120);
        assert!(!TokenManager::is_expired(&t, 1_000));
        assert!(!TokenManager::is_expired(&t, 1_000 + 89));
        assert!(TokenManager::is_expired(&t, 1_000 + 90));
    }
}
