// ── Core error types ──
//
// The error taxonomy callers program against. Wire-level failures from
// `tedee-api` are folded into `Auth`, `RateLimit` and `Request`; the local
// path adds `LocalAuth` and `DataUpdate` for failures that had no cloud
// credential to fall back to.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    /// HTTP 401 from either API.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// HTTP 429, in practice only from the cloud API.
    #[error("Rate limited: {message}")]
    RateLimit { message: String },

    /// Any other failed status, network fault or malformed response.
    #[error("Request failed: {message}")]
    Request {
        message: String,
        status: Option<u16>,
    },

    // ── Local path without fallback ─────────────────────────────────
    /// The bridge rejected the local token and no personal token is configured.
    #[error("Local API authentication failed")]
    LocalAuth {
        #[source]
        source: tedee_api::Error,
    },

    /// The local call failed and no personal token is configured.
    #[error("Error while calling local API endpoint {path}")]
    DataUpdate {
        path: String,
        #[source]
        source: tedee_api::Error,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Webhook error: {message}")]
    Webhook { message: String },

    #[error("{message}")]
    Client { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    pub(crate) fn webhook(message: impl Into<String>) -> Self {
        Self::Webhook {
            message: message.into(),
        }
    }

    /// Returns `true` for authentication failures on either path.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::LocalAuth { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tedee_api::Error> for CoreError {
    fn from(err: tedee_api::Error) -> Self {
        match err {
            tedee_api::Error::Authentication { message } => CoreError::Auth { message },
            tedee_api::Error::RateLimited { url } => CoreError::RateLimit {
                message: format!("too many requests to {url}"),
            },
            other => CoreError::Request {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}
