//! HTTP transport
//!
//! Sends one logical request, retrying transient failures, and turns
//! unexpected statuses into [`Error::Status`] through the API's error body.
//!
//! # Retry strategy
//!
//! - Transport failures, HTTP 429 and 5xx are retried up to
//!   `max_retries` times, including failures to obtain an access token
//! - A POST is replayed only on 429 or when the connection could not be
//!   established; anything else may already have created the entity
//! - Backoff starts at `min_wait`, doubles per attempt and is capped at
//!   `max_wait`; a `Retry-After` on a 429 is honored up to `max_wait`
//! - A 401 under OAuth drops the cached access token and is retried once
//! - Everything else is returned as is

use reqwest::header::{ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use site24x7_core::config::{ClientConfig, RetryConfig};
use site24x7_core::{ApiErrorBody, Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::Authenticator;

/// Media type selecting version 2 of the API
const ACCEPT_V2: &str = "application/json; version=2.0";

/// Shared by every collection of one client
#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    auth: Authenticator,
    retry: RetryConfig,
}

/// Response of a single attempt
struct Reply {
    status: StatusCode,
    retry_after: Option<u64>,
    body: String,
}

/// An attempt that got no response
struct SendError {
    error: Error,
    /// The connection was never established
    connect: bool,
}

/// An attempt that did not produce the expected status
struct Failure {
    error: Error,
    retry_after: Option<u64>,
    retryable: bool,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: Authenticator::from_config(&config.auth),
            retry: config.retry,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a request and return the body of the expected response
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method
    /// - `path`: Path relative to the base URL (e.g. `monitors/123`)
    /// - `body`: JSON body, if any
    /// - `expected`: The only status treated as success
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Raw body of the expected response
    /// - `Err(Error::Status)`: Any other status, decoded from the error body
    /// - `Err(Error::Transport)`: Connection failure after all retries
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        expected: StatusCode,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        let context = format!("{} {}", method, url);

        let mut attempt: u32 = 0;
        let mut reauthenticated = false;

        loop {
            let failure = match self.auth.header(&self.http).await {
                // nothing was sent yet, so any method may try again
                Err(error) => Failure {
                    retryable: is_transient(&error),
                    error,
                    retry_after: None,
                },
                Ok(authorization) => match self.attempt(&method, &url, body, &authorization).await {
                    Ok(reply) if reply.status == expected => return Ok(reply.body),
                    Ok(reply)
                        if reply.status == StatusCode::UNAUTHORIZED
                            && self.auth.is_refreshable()
                            && !reauthenticated =>
                    {
                        warn!("{} was rejected as unauthorized, refreshing access token", context);
                        self.auth.invalidate().await;
                        reauthenticated = true;
                        continue;
                    }
                    Ok(reply) => Failure {
                        retryable: is_retryable_status(&method, reply.status),
                        error: ApiErrorBody::into_error(
                            reply.status.as_u16(),
                            &reply.body,
                            Some(&context),
                        ),
                        retry_after: reply.retry_after,
                    },
                    Err(SendError { error, connect }) => Failure {
                        retryable: connect || method != Method::POST,
                        error,
                        retry_after: None,
                    },
                },
            };

            if !failure.retryable || attempt >= self.retry.max_retries {
                return Err(failure.error);
            }

            let delay = retry_delay(&self.retry, attempt, failure.retry_after);
            warn!(
                "{} failed (attempt {}/{}), retrying in {:.1}s: {}",
                context,
                attempt + 1,
                self.retry.max_retries,
                delay.as_secs_f32(),
                failure.error
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        authorization: &str,
    ) -> std::result::Result<Reply, SendError> {
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, ACCEPT_V2)
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| SendError {
            connect: e.is_connect(),
            error: if e.is_timeout() {
                Error::transport(format!("{} {} timed out: {}", method, url, e))
            } else {
                Error::transport(format!("{} {} failed: {}", method, url, e))
            },
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, url, status.as_u16());

        // read before the body consumes the response
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.map_err(|e| SendError {
            connect: false,
            error: Error::transport(format!("Failed to read response body: {}", e)),
        })?;

        Ok(Reply {
            status,
            retry_after,
            body,
        })
    }
}

/// Statuses worth another attempt.
///
/// A POST is only replayed on 429: a 5xx may arrive after the entity was
/// stored, and a second create would duplicate it.
pub(crate) fn is_retryable_status(method: &Method, status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || (status.is_server_error() && *method != Method::POST)
}

/// Failures that may clear up on their own: lost connections, 429 and 5xx
pub(crate) fn is_transient(error: &Error) -> bool {
    match error {
        Error::Transport(_) => true,
        Error::Status { status, .. } => *status == 429 || (500..600).contains(status),
        _ => false,
    }
}

/// Exponential backoff: `min_wait * 2^attempt`, capped at `max_wait`
pub(crate) fn backoff_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let secs = retry
        .min_wait_secs
        .saturating_mul(1_u64 << capped_attempt)
        .min(retry.max_wait_secs);
    Duration::from_secs(secs)
}

fn retry_delay(retry: &RetryConfig, attempt: u32, retry_after: Option<u64>) -> Duration {
    match retry_after {
        Some(secs) => Duration::from_secs(secs.min(retry.max_wait_secs)),
        None => backoff_delay(retry, attempt),
    }
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

/// Decode the `data` member of a success body
pub(crate) fn decode_data<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| Error::decode(context, e))?;

    envelope
        .data
        .ok_or_else(|| Error::decode(context, "response carried no data"))
}

/// Like [`decode_data`], reading a missing or `null` list as empty
pub(crate) fn decode_list<T: DeserializeOwned>(body: &str, context: &str) -> Result<Vec<T>> {
    let envelope: Envelope<Vec<T>> =
        serde_json::from_str(body).map_err(|e| Error::decode(context, e))?;

    Ok(envelope.data.unwrap_or_default())
}
