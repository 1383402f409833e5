//! Configuration types for the Site24x7 provider
//!
//! [`ClientConfig`] describes how to reach the REST API: where it lives, how
//! to authenticate and how hard to retry. It can be deserialized (every
//! field except the credentials has a default) or read from `SITE24X7_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.site24x7.com/api";

/// Default Zoho accounts server for the OAuth2 refresh flow
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.zoho.com";

pub const ENV_AUTHTOKEN: &str = "SITE24X7_AUTHTOKEN";
pub const ENV_OAUTH2_CLIENT_ID: &str = "SITE24X7_OAUTH2_CLIENT_ID";
pub const ENV_OAUTH2_CLIENT_SECRET: &str = "SITE24X7_OAUTH2_CLIENT_SECRET";
pub const ENV_OAUTH2_REFRESH_TOKEN: &str = "SITE24X7_OAUTH2_REFRESH_TOKEN";
pub const ENV_ACCOUNTS_URL: &str = "SITE24X7_ACCOUNTS_URL";
pub const ENV_API_BASE_URL: &str = "SITE24X7_API_BASE_URL";
pub const ENV_RETRY_MIN_WAIT: &str = "SITE24X7_RETRY_MIN_WAIT";
pub const ENV_RETRY_MAX_WAIT: &str = "SITE24X7_RETRY_MAX_WAIT";
pub const ENV_MAX_RETRIES: &str = "SITE24X7_MAX_RETRIES";
pub const ENV_HTTP_TIMEOUT: &str = "SITE24X7_HTTP_TIMEOUT";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credentials
    pub auth: AuthConfig,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Per-request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration with defaults around the given credentials
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            base_url: default_base_url(),
            auth,
            retry: RetryConfig::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset. A static token wins over OAuth2
    /// credentials when both are present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let auth = match var(ENV_AUTHTOKEN) {
            Some(auth_token) => AuthConfig::Token { auth_token },
            None => AuthConfig::OAuth {
                client_id: var(ENV_OAUTH2_CLIENT_ID).unwrap_or_default(),
                client_secret: var(ENV_OAUTH2_CLIENT_SECRET).unwrap_or_default(),
                refresh_token: var(ENV_OAUTH2_REFRESH_TOKEN).unwrap_or_default(),
                accounts_url: var(ENV_ACCOUNTS_URL).unwrap_or_else(default_accounts_url),
            },
        };

        let mut config = Self::new(auth);
        if let Some(base_url) = var(ENV_API_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(v) = var(ENV_RETRY_MIN_WAIT) {
            config.retry.min_wait_secs = parse_var(ENV_RETRY_MIN_WAIT, &v)?;
        }
        if let Some(v) = var(ENV_RETRY_MAX_WAIT) {
            config.retry.max_wait_secs = parse_var(ENV_RETRY_MAX_WAIT, &v)?;
        }
        if let Some(v) = var(ENV_MAX_RETRIES) {
            config.retry.max_retries = parse_var(ENV_MAX_RETRIES, &v)?;
        }
        if let Some(v) = var(ENV_HTTP_TIMEOUT) {
            config.timeout_secs = parse_var(ENV_HTTP_TIMEOUT, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.base_url.is_empty() {
            return Err(crate::Error::config("API base URL cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        self.auth.validate()?;
        self.retry.validate()?;

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, crate::Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| crate::Error::config(format!("{}={:?}: {}", key, value, e)))
}

/// Credentials for the REST API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// Static `Zoho-authtoken`
    Token {
        /// Account auth token
        auth_token: String,
    },

    /// OAuth2 refresh-token flow
    #[serde(rename = "oauth")]
    OAuth {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        /// Zoho accounts server issuing access tokens
        #[serde(default = "default_accounts_url")]
        accounts_url: String,
    },
}

impl AuthConfig {
    /// Validate the credentials
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            AuthConfig::Token { auth_token } => {
                if auth_token.is_empty() {
                    return Err(crate::Error::config("Auth token cannot be empty"));
                }
                Ok(())
            }
            AuthConfig::OAuth {
                client_id,
                client_secret,
                refresh_token,
                accounts_url,
            } => {
                if client_id.is_empty() || client_secret.is_empty() || refresh_token.is_empty() {
                    return Err(crate::Error::config(format!(
                        "No credentials: set {} or {}, {} and {}",
                        ENV_AUTHTOKEN,
                        ENV_OAUTH2_CLIENT_ID,
                        ENV_OAUTH2_CLIENT_SECRET,
                        ENV_OAUTH2_REFRESH_TOKEN
                    )));
                }
                if accounts_url.is_empty() {
                    return Err(crate::Error::config("Accounts URL cannot be empty"));
                }
                Ok(())
            }
        }
    }

    /// Credential kind name, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::Token { .. } => "token",
            AuthConfig::OAuth { .. } => "oauth",
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::Token { .. } => f
                .debug_struct("Token")
                .field("auth_token", &"<REDACTED>")
                .finish(),
            AuthConfig::OAuth {
                client_id,
                accounts_url,
                ..
            } => f
                .debug_struct("OAuth")
                .field("client_id", client_id)
                .field("client_secret", &"<REDACTED>")
                .field("refresh_token", &"<REDACTED>")
                .field("accounts_url", accounts_url)
                .finish(),
        }
    }
}

/// Retry policy for transport failures, 429 and 5xx responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// First backoff delay (in seconds); doubles on every attempt
    #[serde(default = "default_min_wait_secs")]
    pub min_wait_secs: u64,

    /// Upper bound for a single backoff delay (in seconds)
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,

    /// Retries after the first attempt; 0 disables retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.min_wait_secs > self.max_wait_secs {
            return Err(crate::Error::config(format!(
                "Retry min wait ({}s) exceeds max wait ({}s)",
                self.min_wait_secs, self.max_wait_secs
            )));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_wait_secs: default_min_wait_secs(),
            max_wait_secs: default_max_wait_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_accounts_url() -> String {
    DEFAULT_ACCOUNTS_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_wait_secs() -> u64 {
    1
}

fn default_max_wait_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    4
}
