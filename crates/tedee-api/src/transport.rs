// Shared HTTP transport for the local and cloud clients.
//
// Executes exactly one request and maps the status code onto the error
// taxonomy. No retries happen here; the dispatcher in `tedee-core` decides
// whether a failure is worth a second attempt against the other API.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("tedee-rs/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(Error::Transport)
    }
}

/// One pooled HTTP session shared by both API clients.
///
/// Dropping the last clone releases the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport with a fresh `reqwest::Client`.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
            timeout: config.timeout,
        })
    }

    /// Wrap a caller-managed `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute one request.
    ///
    /// Returns `Ok(None)` for 204 and for empty 2xx bodies; whether that is
    /// acceptable is up to the call site (see [`require_body`]).
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url.clone())
            .headers(headers)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        handle_response(&url, resp).await
    }

    /// Execute one request and return the raw status without interpreting it.
    ///
    /// Network faults still fail with [`Error::Transport`].
    pub async fn status(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
    ) -> Result<StatusCode, Error> {
        debug!("{method} {url} (status only)");
        let resp = self
            .http
            .request(method, url)
            .headers(headers)
            .timeout(self.timeout)
            .send()
            .await?;
        Ok(resp.status())
    }
}

/// Statuses that carry a usable answer. 204 is handled separately as "no body".
pub fn is_accepted(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED
    )
}

async fn handle_response(url: &Url, resp: reqwest::Response) -> Result<Option<Value>, Error> {
    let status = resp.status();
    trace!(status = status.as_u16(), "response received");

    match status {
        StatusCode::NO_CONTENT => Ok(None),
        s if is_accepted(s) => {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str(&body).map(Some).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        }
        StatusCode::UNAUTHORIZED => Err(Error::Authentication {
            message: format!("{url} rejected the credential"),
        }),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited {
            url: url.to_string(),
        }),
        _ => {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                },
            })
        }
    }
}

/// Turn an empty response into [`Error::EmptyBody`] for call sites that need data.
pub fn require_body(body: Option<Value>, endpoint: &str) -> Result<Value, Error> {
    body.ok_or_else(|| Error::EmptyBody {
        endpoint: endpoint.to_owned(),
    })
}
