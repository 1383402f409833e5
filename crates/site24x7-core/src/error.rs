//! Error types for the Site24x7 provider
//!
//! This module defines all error types used throughout the workspace,
//! together with the decoder for the API's error body and the
//! not-found classifier used by `exists` and `delete`.

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the Site24x7 provider
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS or timeout failure before a response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with an unexpected HTTP status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Site24x7 `error_code`, when the body carried one
        code: Option<i64>,
        /// Human readable message
        message: String,
    },

    /// A success response could not be decoded
    #[error("Failed to decode {context}: {detail}")]
    Decode {
        /// What was being decoded
        context: String,
        /// Decoder message
        detail: String,
    },

    /// Local validation failure; raised before any remote call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The default-resolver found an empty list
    #[error("no {0} configured")]
    NoDefault(&'static str),

    /// Authentication errors (token refresh, missing credentials)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a status error without a Site24x7 error code
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Create a "not found" status error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    /// Create a decode error
    pub fn decode(context: impl Into<String>, detail: impl ToString) -> Self {
        Self::Decode {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is the remote "not found" condition.
    ///
    /// `exists` maps this to `Ok(false)` and `delete` treats it as success;
    /// every other error is propagated verbatim.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// HTTP status carried by the error, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Error body returned by the Site24x7 API for non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric Site24x7 error code
    #[serde(default)]
    pub error_code: i64,
    /// Message
    #[serde(default)]
    pub message: String,
    /// Free-form details; any JSON shape
    #[serde(default)]
    pub error_info: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Decode an error body and turn it into a [`Error::Status`].
    ///
    /// `context` (usually the request line) is appended as "More info" so a
    /// failing request can be traced back in the host's output.
    pub fn into_error(status: u16, body: &str, context: Option<&str>) -> Error {
        let suffix = context
            .map(|info| format!(". More info: {}", info))
            .unwrap_or_default();

        let parsed: ApiErrorBody = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Error::Status {
                    status,
                    code: None,
                    message: format!("json decoding of error failed: ({}){}", e, suffix),
                };
            }
        };

        let message = match parsed.error_info {
            Some(ref details) if !details.is_null() => {
                format!("{} ({}){}", parsed.message, details, suffix)
            }
            _ => format!("{}{}", parsed.message, suffix),
        };

        Error::Status {
            status,
            code: Some(parsed.error_code),
            message,
        }
    }
}
