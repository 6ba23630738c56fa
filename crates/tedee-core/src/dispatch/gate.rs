// ── Local call spacing ──
//
// The bridge tolerates roughly one request per second. Every local call
// passes through a `CallGate`, which sleeps until the minimum interval
// since the previous call has elapsed. The pass holds the gate's lock for
// the duration of the call, so local calls are also serialized.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{Instant, sleep};

/// Enforces a minimum spacing between calls.
#[derive(Debug)]
pub struct CallGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

/// Permission to make one call. Dropping it lets the next caller in.
#[derive(Debug)]
pub struct GatePass<'a> {
    _guard: MutexGuard<'a, Option<Instant>>,
    waited: Duration,
}

impl GatePass<'_> {
    /// How long the caller slept before the gate opened.
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl CallGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time still to wait after a call made at `last`, as seen at `now`.
    fn remaining(&self, last: Option<Instant>, now: Instant) -> Duration {
        last.map_or(Duration::ZERO, |last| {
            self.min_interval.saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Wait for the gate, then mark the call as started.
    pub async fn pass(&self) -> GatePass<'_> {
        let mut guard = self.last_call.lock().await;
        let waited = self.remaining(*guard, Instant::now());
        if !waited.is_zero() {
            sleep(waited).await;
        }
        *guard = Some(Instant::now());
        GatePass {
            _guard: guard,
            waited,
        }
    }
}
