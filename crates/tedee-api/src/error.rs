use thiserror::Error;

/// Top-level error type for the `tedee-api` crate.
///
/// Mirrors the three failure classes both Tedee APIs produce: authentication
/// (HTTP 401), rate limiting (HTTP 429) and everything else. `tedee-core`
/// maps these into its own taxonomy and decides on local/cloud fallback.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API rejected the credential (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A credential could not be encoded as an HTTP header value.
    #[error("Invalid {header} header value: {reason}")]
    InvalidHeader { header: &'static str, reason: String },

    // ── Rate limiting ───────────────────────────────────────────────
    /// Too many requests (HTTP 429). Only the cloud API does this in practice.
    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Any status outside 200/201/202/204, 401 and 429.
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The call site needs a body but the API answered 204 or an empty 2xx.
    #[error("Empty response body from {endpoint}")]
    EmptyBody { endpoint: String },
}

impl Error {
    /// Returns `true` for HTTP 401 responses.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The HTTP status code behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
