//! HTTP transport for upstream calls.
//!
//! [`Upstream`] is the single seam between the fetcher and the network.
//! [`HttpUpstream`] implements it with reqwest, centralizing status-code checks
//! (429 rate limiting with `Retry-After` parsing, non-success → [`UpstreamError::Api`])
//! and rejection of error bodies, so nothing invalid ever reaches the cache.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::UpstreamError;

/// Something that can GET a URL and hand back decoded JSON.
pub trait Upstream: Send + Sync {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// reqwest-backed [`Upstream`]. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    /// Create a client with the given user agent and per-request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
        }
    }
}

impl Default for HttpUpstream {
    fn default() -> Self {
        Self::new("wkcal/0.1", Duration::from_secs(10))
    }
}

impl Upstream for HttpUpstream {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        // request URLs embed the API key; keep it out of error messages
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;
        decode_response(resp).await
    }
}

/// Status check, JSON decode and body check, in that order.
///
/// # Errors
///
/// Returns the first failure among [`check_response`], JSON decoding
/// ([`UpstreamError::Parse`]) and [`check_body`].
pub async fn decode_response(resp: reqwest::Response) -> Result<Value, UpstreamError> {
    let value: Value = check_response(resp).await?.json().await.map_err(|e| {
        UpstreamError::Parse(format!("response is not JSON: {}", e.without_url()))
    })?;
    check_body(value)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`UpstreamError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`UpstreamError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(UpstreamError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(UpstreamError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Reject bodies that carry an `error` object instead of data.
///
/// The API reports unknown users and bad keys this way, sometimes with a
/// 200 status.
pub fn check_body(value: Value) -> Result<Value, UpstreamError> {
    let Some(error) = value.get("error").filter(|e| !e.is_null()) else {
        return Ok(value);
    };
    let field = |name: &str| {
        error
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Err(UpstreamError::Rejected {
        code: field("code"),
        message: field("message"),
    })
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
