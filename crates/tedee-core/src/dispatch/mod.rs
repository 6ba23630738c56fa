// ── Dual-path dispatcher ──
//
// Every operation is tried against the bridge's local API first (when one is
// configured) and falls back to the cloud API when a personal token is
// available. The local attempt is classified into a `LocalOutcome`; the
// fallback decision is a single `match` on that outcome.

mod gate;

use std::sync::Arc;

use serde_json::Value;
use strum::Display;
use tracing::debug;

use tedee_api::cloud::endpoints as cloud;
use tedee_api::local::endpoints as local;
use tedee_api::{ApiRequest, CloudClient, LocalClient, UnlockMode};

pub use gate::{CallGate, GatePass};

use crate::error::CoreError;
use crate::model::LockId;
use crate::observer::{ClientEvent, ClientObserver};

/// Which API answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ApiSource {
    Local,
    Cloud,
}

/// An operation that exists on both APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListLocks,
    SyncLocks,
    Lock(LockId),
    Unlock(LockId, UnlockMode),
    Pull(LockId),
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::ListLocks => "list_locks",
            Self::SyncLocks => "sync_locks",
            Self::Lock(_) => "lock",
            Self::Unlock(..) => "unlock",
            Self::Pull(_) => "pull",
        }
    }

    pub fn lock_id(self) -> Option<LockId> {
        match self {
            Self::ListLocks | Self::SyncLocks => None,
            Self::Lock(id) | Self::Unlock(id, _) | Self::Pull(id) => Some(id),
        }
    }

    /// The bridge has no separate sync endpoint; both reads use `/lock`.
    fn local_request(self) -> ApiRequest {
        match self {
            Self::ListLocks | Self::SyncLocks => local::list_locks(),
            Self::Lock(id) => local::lock(id),
            Self::Unlock(id, mode) => local::unlock(id, mode),
            Self::Pull(id) => local::pull(id),
        }
    }

    fn cloud_request(self) -> ApiRequest {
        match self {
            Self::ListLocks => cloud::list_locks(),
            Self::SyncLocks => cloud::sync_locks(),
            Self::Lock(id) => cloud::lock(id),
            Self::Unlock(id, mode) => cloud::unlock(id, mode),
            Self::Pull(id) => cloud::pull(id),
        }
    }
}

/// Result of one attempt against the local API.
#[derive(Debug)]
pub enum LocalOutcome {
    Success(Option<Value>),
    AuthFailed(tedee_api::Error),
    RateLimited(tedee_api::Error),
    Failed(tedee_api::Error),
}

impl From<Result<Option<Value>, tedee_api::Error>> for LocalOutcome {
    fn from(result: Result<Option<Value>, tedee_api::Error>) -> Self {
        match result {
            Ok(body) => Self::Success(body),
            Err(e) if e.is_auth() => Self::AuthFailed(e),
            Err(e) if e.is_rate_limited() => Self::RateLimited(e),
            Err(e) => Self::Failed(e),
        }
    }
}

/// A successful response and the API that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub body: Option<Value>,
    pub source: ApiSource,
}

/// Routes operations to the local API, the cloud API, or both in turn.
pub struct Dispatcher {
    local: Option<LocalClient>,
    cloud: Option<CloudClient>,
    gate: CallGate,
    observer: Arc<dyn ClientObserver>,
}

impl Dispatcher {
    pub fn new(
        local: Option<LocalClient>,
        cloud: Option<CloudClient>,
        gate: CallGate,
        observer: Arc<dyn ClientObserver>,
    ) -> Self {
        Self {
            local,
            cloud,
            gate,
            observer,
        }
    }

    pub fn uses_local_api(&self) -> bool {
        self.local.is_some()
    }

    pub fn has_cloud(&self) -> bool {
        self.cloud.is_some()
    }

    pub fn cloud(&self) -> Option<&CloudClient> {
        self.cloud.as_ref()
    }

    pub fn observer(&self) -> &dyn ClientObserver {
        self.observer.as_ref()
    }

    pub(crate) fn set_observer(&mut self, observer: Arc<dyn ClientObserver>) {
        self.observer = observer;
    }

    /// Run `op` on the local API first, falling back to the cloud.
    pub async fn dispatch(&self, op: Operation) -> Result<Dispatched, CoreError> {
        if let Some(client) = &self.local {
            let req = op.local_request();
            let error = match self.attempt_local(client, &req).await {
                LocalOutcome::Success(body) => {
                    return Ok(self.completed(op, body, ApiSource::Local));
                }
                LocalOutcome::AuthFailed(e) if self.cloud.is_none() => {
                    return Err(CoreError::LocalAuth { source: e });
                }
                LocalOutcome::RateLimited(e) | LocalOutcome::Failed(e) if self.cloud.is_none() => {
                    return Err(CoreError::DataUpdate {
                        path: req.display_path(),
                        source: e,
                    });
                }
                LocalOutcome::AuthFailed(e) | LocalOutcome::RateLimited(e) | LocalOutcome::Failed(e) => e,
            };
            self.observer.on_event(&ClientEvent::LocalFallback {
                path: &req.display_path(),
                error: &error,
            });
        }

        let Some(cloud) = &self.cloud else {
            return Err(CoreError::client("Neither local API nor personal token configured"));
        };
        let body = cloud.send(&op.cloud_request()).await?;
        Ok(self.completed(op, body, ApiSource::Cloud))
    }

    /// Run a request that only exists on the bridge. No fallback.
    pub async fn local_only(&self, req: &ApiRequest) -> Result<Option<Value>, CoreError> {
        let Some(client) = &self.local else {
            return Err(CoreError::client("Local API not configured"));
        };
        match self.attempt_local(client, req).await {
            LocalOutcome::Success(body) => Ok(body),
            LocalOutcome::AuthFailed(e) | LocalOutcome::RateLimited(e) | LocalOutcome::Failed(e) => {
                Err(e.into())
            }
        }
    }

    async fn attempt_local(&self, client: &LocalClient, req: &ApiRequest) -> LocalOutcome {
        let pass = self.gate.pass().await;
        if !pass.waited().is_zero() {
            self.observer.on_event(&ClientEvent::LocalThrottled {
                waited: pass.waited(),
            });
        }
        debug!(method = %req.method, path = %req.display_path(), "local API call");
        LocalOutcome::from(client.send(req).await)
    }

    fn completed(&self, op: Operation, body: Option<Value>, source: ApiSource) -> Dispatched {
        self.observer.on_event(&ClientEvent::Completed {
            operation: op.name(),
            source,
        });
        Dispatched { body, source }
    }
}
