// ── Runtime client configuration ──
//
// These types describe *how* to reach the locks. They carry credential
// data and timing knobs, but never touch disk; `tedee-config` or the
// embedding application builds a `ClientConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use tedee_api::TokenMode;
use tedee_api::cloud::CLOUD_API_URL;
use tedee_api::local::LOCAL_API_PORT;

/// Access to a bridge's local API.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Bridge IP address or hostname on the LAN.
    pub host: String,
    pub port: u16,
    /// Shared secret configured in the bridge settings.
    pub token: SecretString,
    pub token_mode: TokenMode,
}

impl LocalConfig {
    pub fn new(host: impl Into<String>, token: SecretString) -> Self {
        Self {
            host: host.into(),
            port: LOCAL_API_PORT,
            token,
            token_mode: TokenMode::Secure,
        }
    }
}

/// How long commands block after the API accepted them.
///
/// The APIs confirm that a command was *accepted*, not that the motor
/// finished. These waits only make it likely that a following `sync()`
/// observes the new physical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    pub lock: Duration,
    pub unlock: Duration,
    /// Added to the lock's pull-spring duration for `open` and `pull`.
    pub pull_margin: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            lock: Duration::from_secs(5),
            unlock: Duration::from_secs(5),
            pull_margin: Duration::from_secs(1),
        }
    }
}

impl SettleDelays {
    /// No waiting at all; useful when the caller polls on its own.
    pub fn none() -> Self {
        Self {
            lock: Duration::ZERO,
            unlock: Duration::ZERO,
            pull_margin: Duration::ZERO,
        }
    }
}

/// Configuration for one [`TedeeClient`](crate::TedeeClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cloud personal key. Enables the cloud path and local→cloud fallback.
    pub personal_token: Option<SecretString>,
    /// Local bridge access. When set, every operation tries the bridge first.
    pub local: Option<LocalConfig>,
    /// Only track locks paired with this bridge.
    pub bridge_id: Option<i64>,
    /// Per-request timeout.
    pub timeout: Duration,
    pub cloud_url: Url,
    pub settle: SettleDelays,
    /// Minimum spacing between two local API calls.
    pub local_min_interval: Duration,
}

fn default_cloud_url() -> Url {
    Url::parse(CLOUD_API_URL).expect("CLOUD_API_URL is a valid URL")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            personal_token: None,
            local: None,
            bridge_id: None,
            timeout: Duration::from_secs(10),
            cloud_url: default_cloud_url(),
            settle: SettleDelays::default(),
            local_min_interval: Duration::from_secs(1),
        }
    }
}

impl ClientConfig {
    /// Cloud-only configuration.
    pub fn cloud(personal_token: SecretString) -> Self {
        Self {
            personal_token: Some(personal_token),
            ..Self::default()
        }
    }

    /// Local-only configuration. No fallback is possible.
    pub fn local(local: LocalConfig) -> Self {
        Self {
            local: Some(local),
            ..Self::default()
        }
    }

    pub fn with_personal_token(mut self, token: SecretString) -> Self {
        self.personal_token = Some(token);
        self
    }

    pub fn with_local(mut self, local: LocalConfig) -> Self {
        self.local = Some(local);
        self
    }

    pub fn with_bridge_id(mut self, bridge_id: i64) -> Self {
        self.bridge_id = Some(bridge_id);
        self
    }

    pub fn with_settle(mut self, settle: SettleDelays) -> Self {
        self.settle = settle;
        self
    }

    pub fn uses_local_api(&self) -> bool {
        self.local.is_some()
    }
}
