// ── Client facade ──
//
// `TedeeClient` owns the transport, the dispatcher and the lock registry.
// Reads borrow the registry; discovery, sync and webhook events take
// `&mut self` because they are the only writers.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};
use url::Url;

use tedee_api::local::endpoints as local;
use tedee_api::transport::require_body;
use tedee_api::{
    BridgeEntry, Callback, CallbackRequest, CloudClient, HttpTransport, LocalClient, LocalToken,
    TransportConfig, UnlockMode,
};

use crate::config::{ClientConfig, SettleDelays};
use crate::dispatch::{ApiSource, CallGate, Dispatched, Dispatcher, Operation};
use crate::error::CoreError;
use crate::model::{Bridge, DEFAULT_PULL_SPRING_DURATION, Lock, LockId};
use crate::observer::{ClientEvent, ClientObserver, TracingObserver};
use crate::reconcile::{self, ReconcileReport, WebhookOutcome};
use crate::store::{LockRegistry, LockSnapshot};
use crate::webhook::WebhookEvent;

/// Headers the bridge attaches to every webhook delivery.
pub type WebhookHeaders = Vec<BTreeMap<String, String>>;

/// Acknowledgement of a lock command.
///
/// The API accepted the command and the settle delay has elapsed. The
/// physical operation may still be in progress or may have failed; call
/// [`TedeeClient::sync`] to observe the actual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAck {
    pub lock_id: LockId,
    pub command: &'static str,
    pub source: ApiSource,
    pub settled_for: Duration,
}

/// Client for one Tedee account and, optionally, one bridge.
pub struct TedeeClient {
    transport: HttpTransport,
    dispatcher: Dispatcher,
    registry: LockRegistry,
    bridge_id: Option<i64>,
    cloud_url: Url,
    settle: SettleDelays,
}

impl TedeeClient {
    /// Build a client with its own HTTP session.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        })
        .map_err(|e| CoreError::Config {
            message: format!("cannot build HTTP client: {e}"),
        })?;
        Self::from_transport(config, transport)
    }

    /// Build a client on a caller-managed `reqwest::Client`.
    pub fn with_http(config: ClientConfig, http: reqwest::Client) -> Result<Self, CoreError> {
        let timeout = config.timeout;
        Self::from_transport(config, HttpTransport::with_client(http, timeout))
    }

    /// Build a client and discover locks right away.
    pub async fn connect(config: ClientConfig) -> Result<Self, CoreError> {
        let mut client = Self::new(config)?;
        client.get_locks().await?;
        Ok(client)
    }

    fn from_transport(config: ClientConfig, transport: HttpTransport) -> Result<Self, CoreError> {
        let invalid = |e: tedee_api::Error| CoreError::Config {
            message: e.to_string(),
        };

        let local = config
            .local
            .map(|local| {
                LocalClient::new(
                    transport.clone(),
                    &local.host,
                    Some(local.port),
                    LocalToken::new(local.token, local.token_mode),
                )
            })
            .transpose()
            .map_err(invalid)?;

        let cloud = config
            .personal_token
            .as_ref()
            .map(|token| CloudClient::new(transport.clone(), config.cloud_url.clone(), token))
            .transpose()
            .map_err(invalid)?;

        if local.is_none() && cloud.is_none() {
            return Err(CoreError::Config {
                message: "either a personal token or local API access is required".into(),
            });
        }

        debug!(
            local = local.is_some(),
            cloud = cloud.is_some(),
            bridge_id = ?config.bridge_id,
            "tedee client configured"
        );

        Ok(Self {
            dispatcher: Dispatcher::new(
                local,
                cloud,
                CallGate::new(config.local_min_interval),
                Arc::new(TracingObserver),
            ),
            transport,
            registry: LockRegistry::new(),
            bridge_id: config.bridge_id,
            cloud_url: config.cloud_url,
            settle: config.settle,
        })
    }

    /// Replace the default tracing observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.dispatcher.set_observer(observer);
        self
    }

    /// Release the HTTP session. Pending calls must have completed.
    pub fn shutdown(self) {
        debug!(locks = self.registry.len(), "tedee client shut down");
        drop(self);
    }

    pub fn uses_local_api(&self) -> bool {
        self.dispatcher.uses_local_api()
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn locks(&self) -> &LockRegistry {
        &self.registry
    }

    pub fn lock_by_id(&self, lock_id: LockId) -> Option<&Lock> {
        self.registry.get(lock_id)
    }

    pub fn locks_snapshot(&self) -> LockSnapshot {
        self.registry.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<LockSnapshot> {
        self.registry.subscribe()
    }

    /// `false` for untracked locks.
    pub fn is_locked(&self, lock_id: LockId) -> bool {
        self.registry.get(lock_id).is_some_and(Lock::is_locked)
    }

    /// `false` for untracked locks.
    pub fn is_unlocked(&self, lock_id: LockId) -> bool {
        self.registry.get(lock_id).is_some_and(Lock::is_unlocked)
    }

    // ── Discovery & sync ─────────────────────────────────────────────

    /// Discover locks and (re)create their registry entries.
    pub async fn get_locks(&mut self) -> Result<ReconcileReport, CoreError> {
        let Dispatched { body, source } = self.dispatcher.dispatch(Operation::ListLocks).await?;
        let body = require_body(body, "lock")?;
        let report = reconcile::apply_discovery(&mut self.registry, &body, self.bridge_id)?;
        info!(%source, count = report.updated.len(), "locks discovered");
        self.report_not_reported(&report);
        Ok(report)
    }

    /// Refresh the status of every tracked lock.
    ///
    /// Fails if the response contains a lock that was never discovered.
    pub async fn sync(&mut self) -> Result<ReconcileReport, CoreError> {
        let Dispatched { body, source } = self.dispatcher.dispatch(Operation::SyncLocks).await?;
        let body = require_body(body, "lock/sync")?;
        let report = reconcile::apply_sync(&mut self.registry, &body, self.bridge_id, source)?;
        debug!(%source, count = report.updated.len(), "locks synced");
        self.report_not_reported(&report);
        Ok(report)
    }

    fn report_not_reported(&self, report: &ReconcileReport) {
        for &lock_id in &report.not_reported {
            self.dispatcher
                .observer()
                .on_event(&ClientEvent::LockNotReported { lock_id });
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn lock(&self, lock_id: LockId) -> Result<CommandAck, CoreError> {
        self.command(Operation::Lock(lock_id), self.settle.lock).await
    }

    pub async fn unlock(&self, lock_id: LockId) -> Result<CommandAck, CoreError> {
        self.command(Operation::Unlock(lock_id, UnlockMode::Unlock), self.settle.unlock)
            .await
    }

    /// Unlock and pull the latch in one motion.
    pub async fn open(&self, lock_id: LockId) -> Result<CommandAck, CoreError> {
        let settle = self.pull_settle(lock_id);
        self.command(Operation::Unlock(lock_id, UnlockMode::UnlockAndPull), settle)
            .await
    }

    /// Pull the latch of an already unlocked lock.
    pub async fn pull(&self, lock_id: LockId) -> Result<CommandAck, CoreError> {
        let settle = self.pull_settle(lock_id);
        self.command(Operation::Pull(lock_id), settle).await
    }

    fn pull_settle(&self, lock_id: LockId) -> Duration {
        let spring = self
            .registry
            .get(lock_id)
            .map_or(DEFAULT_PULL_SPRING_DURATION, |lock| lock.pull_spring_duration);
        Duration::from_secs(spring) + self.settle.pull_margin
    }

    async fn command(&self, op: Operation, settle: Duration) -> Result<CommandAck, CoreError> {
        let Dispatched { source, .. } = self.dispatcher.dispatch(op).await?;
        let lock_id = op.lock_id().unwrap_or_default();
        debug!(lock_id, command = op.name(), %source, settle_ms = settle.as_millis(), "command accepted");
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        Ok(CommandAck {
            lock_id,
            command: op.name(),
            source,
            settled_for: settle,
        })
    }

    // ── Bridges ──────────────────────────────────────────────────────

    /// The bridge behind the local API. Its id is reported as 0.
    pub async fn get_local_bridge(&self) -> Result<Bridge, CoreError> {
        if !self.uses_local_api() {
            return Err(CoreError::client("Local API not configured."));
        }
        let body = self
            .dispatcher
            .local_only(&local::bridge())
            .await
            .map_err(|e| {
                debug!(error = %e, "local bridge call failed");
                CoreError::client("Unable to get local bridge")
            })?
            .ok_or_else(|| CoreError::client("Unable to get local bridge"))?;
        let entry: BridgeEntry = serde_json::from_value(body).map_err(|e| {
            debug!(error = %e, "unexpected local bridge payload");
            CoreError::client("Unable to get local bridge")
        })?;
        Ok(entry.into())
    }

    /// Every bridge on the account. Requires a personal token.
    pub async fn get_bridges(&self) -> Result<Vec<Bridge>, CoreError> {
        let Some(cloud) = self.dispatcher.cloud() else {
            return Err(CoreError::client("Listing bridges requires a personal token"));
        };
        let bridges = cloud.list_bridges().await?;
        Ok(bridges.into_iter().map(Bridge::from).collect())
    }

    /// Whether the cloud accepts `token` as a personal key.
    pub async fn validate_personal_key(&self, token: &SecretString) -> bool {
        tedee_api::cloud::is_personal_key_valid(&self.transport, &self.cloud_url, token).await
    }

    // ── Webhook events ───────────────────────────────────────────────

    /// Apply an event pushed by the bridge to a registered callback URL.
    pub fn apply_webhook_event(&mut self, message: &Value) -> Result<WebhookOutcome, CoreError> {
        let event = WebhookEvent::parse(message)?;
        let outcome = reconcile::apply_webhook(&mut self.registry, &event);
        match outcome {
            WebhookOutcome::Applied(lock_id) => debug!(lock_id, ?event, "webhook event applied"),
            WebhookOutcome::UnknownLock(lock_id) => self
                .dispatcher
                .observer()
                .on_event(&ClientEvent::WebhookForUnknownLock { lock_id }),
            WebhookOutcome::Informational => debug!(?event, "informational webhook event"),
            WebhookOutcome::Ignored => debug!(?event, "unrecognized webhook event"),
        }
        Ok(outcome)
    }

    // ── Webhook administration (local API only) ──────────────────────

    pub async fn get_webhooks(&self) -> Result<Vec<Callback>, CoreError> {
        let body = self
            .dispatcher
            .local_only(&local::list_callbacks())
            .await
            .map_err(|e| {
                debug!(error = %e, "listing callbacks failed");
                CoreError::webhook("Unable to get webhooks")
            })?
            .ok_or_else(|| CoreError::webhook("Unable to get webhooks"))?;
        serde_json::from_value(body)
            .map_err(|e| CoreError::webhook(format!("Unable to get webhooks: {e}")))
    }

    /// Register a callback URL and return its id.
    pub async fn register_webhook(
        &self,
        url: &str,
        headers: WebhookHeaders,
    ) -> Result<i64, CoreError> {
        debug!(url, "registering webhook");
        let body = callback_body(url, headers)?;
        let created = self
            .dispatcher
            .local_only(&local::create_callback(body))
            .await
            .map_err(|e| {
                debug!(error = %e, "creating callback failed");
                CoreError::webhook("Unable to register webhook")
            })?;

        if let Some(id) = created.as_ref().and_then(|v| v.get("id")).and_then(Value::as_i64) {
            return Ok(id);
        }

        self.get_webhooks()
            .await?
            .into_iter()
            .find(|callback| callback.url == url)
            .map(|callback| callback.id)
            .ok_or_else(|| CoreError::webhook("Webhook id not found"))
    }

    /// Replace every registered callback with a single one.
    pub async fn update_webhooks(&self, url: &str, headers: WebhookHeaders) -> Result<(), CoreError> {
        debug!(url, "replacing webhooks");
        let body = Value::Array(vec![callback_body(url, headers)?]);
        self.dispatcher
            .local_only(&local::replace_callbacks(body))
            .await
            .map_err(|e| {
                debug!(error = %e, "replacing callbacks failed");
                CoreError::webhook("Unable to update webhooks")
            })?;
        Ok(())
    }

    /// Remove every callback. Failures are logged, not returned.
    pub async fn delete_webhooks(&self) {
        debug!("deleting all webhooks");
        if let Err(e) = self
            .dispatcher
            .local_only(&local::replace_callbacks(Value::Array(Vec::new())))
            .await
        {
            debug!(error = %e, "unable to delete webhooks");
        }
    }

    /// Remove one callback. Failures are logged, not returned.
    pub async fn delete_webhook(&self, webhook_id: i64) {
        debug!(webhook_id, "deleting webhook");
        if let Err(e) = self
            .dispatcher
            .local_only(&local::delete_callback(webhook_id))
            .await
        {
            debug!(webhook_id, error = %e, "unable to delete webhook");
        }
    }

    /// Remove every callback whose URL contains `host`.
    pub async fn cleanup_webhooks_by_host(&self, host: &str) {
        debug!(host, "deleting webhooks for host");
        let callbacks = match self.get_webhooks().await {
            Ok(callbacks) => callbacks,
            Err(e) => {
                debug!(error = %e, "unable to list webhooks for cleanup");
                return;
            }
        };
        for callback in callbacks.iter().filter(|cb| cb.url.contains(host)) {
            self.delete_webhook(callback.id).await;
        }
    }
}

fn callback_body(url: &str, headers: WebhookHeaders) -> Result<Value, CoreError> {
    serde_json::to_value(CallbackRequest {
        url: url.to_owned(),
        headers,
    })
    .map_err(|e| CoreError::webhook(format!("invalid webhook body: {e}")))
}

impl std::fmt::Debug for TedeeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TedeeClient")
            .field("local", &self.dispatcher.uses_local_api())
            .field("cloud", &self.dispatcher.has_cloud())
            .field("bridge_id", &self.bridge_id)
            .field("locks", &self.registry.len())
            .finish_non_exhaustive()
    }
}
