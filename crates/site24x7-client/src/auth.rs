//! Request authentication
//!
//! A static account token is sent as is. OAuth2 credentials are exchanged
//! for a short-lived access token at the Zoho accounts server; the token is
//! cached until shortly before it expires.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use site24x7_core::config::AuthConfig;
use site24x7_core::{Error, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Refresh this long before the reported expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Assumed lifetime when the accounts server omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Produces the `Authorization` header value for API requests
pub(crate) enum Authenticator {
    Static {
        auth_token: String,
    },
    OAuth {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_url: String,
        cached: Mutex<Option<AccessToken>>,
    },
}

pub(crate) struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + ChronoDuration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    error: Option<String>,
}

impl Authenticator {
    pub(crate) fn from_config(auth: &AuthConfig) -> Self {
        match auth {
            AuthConfig::Token { auth_token } => Authenticator::Static {
                auth_token: auth_token.clone(),
            },
            AuthConfig::OAuth {
                client_id,
                client_secret,
                refresh_token,
                accounts_url,
            } => Authenticator::OAuth {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                refresh_token: refresh_token.clone(),
                token_url: format!("{}/oauth/v2/token", accounts_url.trim_end_matches('/')),
                cached: Mutex::new(None),
            },
        }
    }

    /// Whether a 401 can be cured by fetching a new token
    pub(crate) fn is_refreshable(&self) -> bool {
        matches!(self, Authenticator::OAuth { .. })
    }

    /// `Authorization` header value, refreshing the access token if needed
    pub(crate) async fn header(&self, http: &reqwest::Client) -> Result<String> {
        match self {
            Authenticator::Static { auth_token } => Ok(format!("Zoho-authtoken {}", auth_token)),
            Authenticator::OAuth { cached, .. } => {
                let mut cached = cached.lock().await;

                if let Some(ref token) = *cached {
                    if token.is_fresh(Utc::now()) {
                        return Ok(format!("Zoho-oauthtoken {}", token.value));
                    }
                    debug!("Access token expired at {}", token.expires_at);
                }

                let token = self.refresh(http).await?;
                let header = format!("Zoho-oauthtoken {}", token.value);
                *cached = Some(token);
                Ok(header)
            }
        }
    }

    /// Drop the cached access token
    pub(crate) async fn invalidate(&self) {
        if let Authenticator::OAuth { cached, .. } = self {
            cached.lock().await.take();
        }
    }

    async fn refresh(&self, http: &reqwest::Client) -> Result<AccessToken> {
        let Authenticator::OAuth {
            client_id,
            client_secret,
            refresh_token,
            token_url,
            ..
        } = self
        else {
            return Err(Error::auth("static tokens cannot be refreshed"));
        };

        let url = reqwest::Url::parse_with_params(
            token_url,
            &[
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ],
        )
        .map_err(|e| Error::config(format!("Invalid accounts URL {}: {}", token_url, e)))?;

        debug!("Refreshing access token at {}", token_url);
        let response = http
            .post(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("reading token response: {}", e)))?;

        // rate limits and server errors are worth a retry, anything else is a rejection
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Error::status(
                status.as_u16(),
                format!("token request returned HTTP {}", status.as_u16()),
            ));
        }
        if !status.is_success() {
            return Err(Error::auth(format!(
                "token request returned HTTP {}",
                status.as_u16()
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("decoding token response: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(Error::auth(format!("token request rejected: {}", error)));
        }
        if parsed.access_token.is_empty() {
            return Err(Error::auth("token response carried no access token"));
        }

        let expires_in = match parsed.expires_in {
            secs if secs > 0 => secs,
            _ => DEFAULT_EXPIRES_IN_SECS,
        };
        info!("Obtained OAuth access token (expires in {}s)", expires_in);

        Ok(AccessToken {
            value: parsed.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(expires_in),
        })
    }
}

// Custom Debug implementation that hides every credential
impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authenticator::Static { .. } => f
                .debug_struct("Static")
                .field("auth_token", &"<REDACTED>")
                .finish(),
            Authenticator::OAuth {
                client_id,
                token_url,
                ..
            } => f
                .debug_struct("OAuth")
                .field("client_id", client_id)
                .field("client_secret", &"<REDACTED>")
                .field("refresh_token", &"<REDACTED>")
                .field("token_url", token_url)
                .finish(),
        }
    }
}
