// Local bridge HTTP client
//
// Resolves endpoint paths against the bridge base URL and signs every call
// with a fresh local token. Spacing between calls is enforced one level up,
// by the dispatcher, so this client stays a thin per-call wrapper.

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::trace;
use url::Url;

use super::{LOCAL_API_PORT, LOCAL_API_VERSION};
use crate::auth::{LOCAL_TOKEN_HEADER, LocalToken};
use crate::error::Error;
use crate::request::ApiRequest;
use crate::transport::HttpTransport;

/// Raw HTTP client for the bridge's local API.
pub struct LocalClient {
    transport: HttpTransport,
    base_url: Url,
    token: LocalToken,
}

impl LocalClient {
    /// Create a client for the bridge at `host:port`.
    ///
    /// `port` defaults to [`LOCAL_API_PORT`] when `None`.
    pub fn new(
        transport: HttpTransport,
        host: &str,
        port: Option<u16>,
        token: LocalToken,
    ) -> Result<Self, Error> {
        let port = port.unwrap_or(LOCAL_API_PORT);
        let base_url = Url::parse(&format!("http://{host}:{port}/{LOCAL_API_VERSION}/"))?;
        Ok(Self {
            transport,
            base_url,
            token,
        })
    }

    /// The bridge base URL, ending in `/v1.0/`.
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

    /// Send one signed request. The token is computed at send time.
    pub async fn send(&self, req: &ApiRequest) -> Result<Option<Value>, Error> {
        let url = self.url(req)?;
        let mut headers = HeaderMap::new();
        headers.insert(LOCAL_TOKEN_HEADER, self.token.header_value()?);
        trace!(mode = ?self.token.mode(), "signed local request");

        self.transport
            .request(req.method.clone(), url, headers, req.body.as_ref())
            .await
    }
}
