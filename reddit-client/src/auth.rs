use serde::Deserialize;
use simulator_core::{CoreError, RedditApiError};
use std::time::{Duration, SystemTime};
use tracing::{error, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Tokens are refreshed this long before their nominal expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// OAuth grant used to obtain an access token.
#[derive(Debug, Clone)]
pub enum AuthGrant {
    /// Application-only read access to public data.
    ClientCredentials,
    /// Script-type user access; required for submitting posts.
    Password { username: String, password: String },
}

#[derive(Debug, Clone)]
pub struct RedditToken {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl RedditToken {
    pub fn is_expired(&self) -> bool {
        SystemTime::now() + EXPIRY_MARGIN >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    /// Reddit reports bad user credentials as 200 + {"error": "..."}.
    #[serde(default)]
    error: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_token(self) -> Result<RedditToken, CoreError> {
        if let Some(reason) = self.error {
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason,
            }));
        }
        match (self.access_token, self.expires_in) {
            (Some(access_token), Some(expires_in)) => Ok(RedditToken {
                access_token,
                expires_at: SystemTime::now() + Duration::from_secs(expires_in),
            }),
            _ => Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "Token response missing access_token".to_string(),
            })),
        }
    }
}

pub async fn request_token(
    http: &reqwest::Client,
    client_id: &str,
    client_secret: &str,
    grant: &AuthGrant,
) -> Result<RedditToken, CoreError> {
    let params: Vec<(&str, &str)> = match grant {
        AuthGrant::ClientCredentials => vec![("grant_type", "client_credentials")],
        AuthGrant::Password { username, password } => vec![
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ],
    };

    let response = http
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            error!("Network error requesting Reddit token: {}", e);
            if e.is_timeout() {
                CoreError::RedditApi(RedditApiError::RequestTimeout)
            } else {
                CoreError::Network(e)
            }
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: "invalid client credentials".to_string(),
        }));
    }
    if !status.is_success() {
        error!("Token request failed with status {}", status);
        return Err(CoreError::RedditApi(RedditApiError::ServerError {
            status_code: status.as_u16(),
        }));
    }

    let token_response: TokenResponse = response.json().await.map_err(|e| {
        error!("Failed to parse token response: {}", e);
        CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: "Failed to parse token response".to_string(),
        })
    })?;

    let token = token_response.into_token()?;
    info!("Obtained Reddit access token");
    Ok(token)
}
