// ── Client observer ──
//
// Dispatch decisions (throttling, fallback, stale locks, webhook outcomes)
// are reported through an injected observer instead of a process-wide
// logger. The default observer forwards to `tracing`.

use std::time::Duration;

use tracing::{debug, info};

use crate::dispatch::ApiSource;
use crate::model::LockId;

/// Something the client decided that the embedding application may care about.
#[derive(Debug)]
#[non_exhaustive]
pub enum ClientEvent<'a> {
    /// A local call waited for the spacing window.
    LocalThrottled { waited: Duration },
    /// The local call failed and the operation is retried against the cloud.
    LocalFallback {
        path: &'a str,
        error: &'a tedee_api::Error,
    },
    /// An operation completed.
    Completed {
        operation: &'a str,
        source: ApiSource,
    },
    /// A tracked lock was missing from a discovery or sync response.
    LockNotReported { lock_id: LockId },
    /// A webhook event referenced a lock this client does not track.
    WebhookForUnknownLock { lock_id: LockId },
}

/// Receives [`ClientEvent`]s. Must be cheap; it runs inline on the call path.
pub trait ClientObserver: Send + Sync {
    fn on_event(&self, event: &ClientEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ClientObserver for TracingObserver {
    fn on_event(&self, event: &ClientEvent<'_>) {
        match event {
            ClientEvent::LocalThrottled { waited } => {
                debug!(waited_ms = waited.as_millis(), "local call throttled");
            }
            ClientEvent::LocalFallback { path, error } => {
                info!(path, error = %error, "local API call failed, retrying with cloud");
            }
            ClientEvent::Completed { operation, source } => {
                debug!(operation, %source, "operation completed");
            }
            ClientEvent::LockNotReported { lock_id } => {
                debug!(lock_id, "tracked lock missing from response, keeping last state");
            }
            ClientEvent::WebhookForUnknownLock { lock_id } => {
                debug!(lock_id, "webhook event for untracked lock ignored");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ClientObserver for NoopObserver {
    fn on_event(&self, _event: &ClientEvent<'_>) {}
}
