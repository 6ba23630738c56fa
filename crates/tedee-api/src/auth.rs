// Credentials for the two Tedee API surfaces.
//
// The cloud API takes a long-lived personal key. The bridge's local API
// takes a shared secret, which by default is never sent as-is: each call
// carries `sha256(secret + millis)` followed by the same millisecond
// timestamp, and the bridge recomputes the hash for that timestamp.

use chrono::Utc;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Header carrying the local API token.
pub const LOCAL_TOKEN_HEADER: &str = "api_token";

/// How the local shared secret is presented to the bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// Time-bound hash of the secret (default).
    #[default]
    Secure,
    /// The raw secret, for bridges configured with plain token mode.
    Plain,
}

/// Derive the time-bound local token for `now_millis`.
///
/// Output is 64 lowercase hex digits followed by the decimal timestamp.
pub fn compute_local_token(secret: &str, now_millis: i64) -> String {
    let digest = Sha256::digest(format!("{secret}{now_millis}").as_bytes());
    format!("{digest:x}{now_millis}")
}

/// The local API shared secret plus its presentation mode.
#[derive(Debug, Clone)]
pub struct LocalToken {
    secret: SecretString,
    mode: TokenMode,
}

impl LocalToken {
    pub fn new(secret: SecretString, mode: TokenMode) -> Self {
        Self { secret, mode }
    }

    pub fn mode(&self) -> TokenMode {
        self.mode
    }

    /// Token value for a request issued at `now_millis`.
    pub fn value_at(&self, now_millis: i64) -> String {
        match self.mode {
            TokenMode::Secure => compute_local_token(self.secret.expose_secret(), now_millis),
            TokenMode::Plain => self.secret.expose_secret().to_owned(),
        }
    }

    /// Sensitive header value for a request issued now.
    pub fn header_value(&self) -> Result<HeaderValue, Error> {
        let token = self.value_at(Utc::now().timestamp_millis());
        sensitive_header(LOCAL_TOKEN_HEADER, &token)
    }
}

/// `Authorization: PersonalKey <token>` for the cloud API.
pub fn personal_key_header(token: &SecretString) -> Result<HeaderValue, Error> {
    sensitive_header(
        "Authorization",
        &format!("PersonalKey {}", token.expose_secret()),
    )
}

fn sensitive_header(header: &'static str, value: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        header,
        reason: e.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}
