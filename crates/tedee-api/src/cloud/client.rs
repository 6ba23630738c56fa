// Cloud API HTTP client
//
// Adds the personal-key header, resolves endpoint paths against the
// versioned base URL and strips the response envelope.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::endpoints;
use crate::auth::personal_key_header;
use crate::error::Error;
use crate::models::BridgeEntry;
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, is_accepted, require_body};

/// Raw HTTP client for the Tedee cloud API.
pub struct CloudClient {
    transport: HttpTransport,
    base_url: Url,
    auth: HeaderValue,
}

impl CloudClient {
    /// Create a client authenticated with a personal key.
    ///
    /// A missing trailing slash on `base_url` is added so relative
    /// endpoint paths join under the version segment.
    pub fn new(
        transport: HttpTransport,
        mut base_url: Url,
        personal_key: &SecretString,
    ) -> Result<Self, Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            transport,
            base_url,
            auth: personal_key_header(personal_key)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, req: &ApiRequest) -> Result<Url, Error> {
        let mut url = self.base_url.join(req.path.trim_start_matches('/'))?;
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(req.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Send one request and return the envelope's `result`.
    ///
    /// `Ok(None)` means the API answered without a body or with a null result.
    pub async fn send(&self, req: &ApiRequest) -> Result<Option<Value>, Error> {
        let url = self.url(req)?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());

        let body = self
            .transport
            .request(req.method.clone(), url, headers, req.body.as_ref())
            .await?;
        Ok(body.and_then(unwrap_envelope))
    }

    /// List all bridges on the account.
    ///
    /// `GET my/bridge`
    pub async fn list_bridges(&self) -> Result<Vec<BridgeEntry>, Error> {
        debug!("listing bridges");
        let req = endpoints::list_bridges();
        let result = require_body(self.send(&req).await?, &req.path)?;
        serde_json::from_value(result.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: result.to_string(),
        })
    }
}

fn unwrap_envelope(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").filter(|v| !v.is_null())
        }
        other => Some(other),
    }
}

/// Check a personal key against the cloud device listing.
///
/// Only 200, 201 and 202 count as valid. Any failure, including network
/// errors, reports the key as invalid.
pub async fn is_personal_key_valid(
    transport: &HttpTransport,
    base_url: &Url,
    personal_key: &SecretString,
) -> bool {
    let Ok(client) = CloudClient::new(transport.clone(), base_url.clone(), personal_key) else {
        return false;
    };
    let req = endpoints::list_devices();
    let Ok(url) = client.url(&req) else {
        return false;
    };
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, client.auth.clone());

    match transport.status(req.method.clone(), url, headers).await {
        Ok(status) => {
            debug!(status = status.as_u16(), "personal key check");
            is_accepted(status)
        }
        Err(e) => {
            debug!(error = %e, "personal key check failed");
            false
        }
    }
}
