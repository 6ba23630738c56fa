//! Lock discovery, dual-path command dispatch and state reconciliation for
//! Tedee smart locks.
//!
//! - **[`TedeeClient`]**: facade owning the HTTP session, the dispatcher and
//!   the lock registry. [`connect()`](TedeeClient::connect) builds a client
//!   and discovers locks in one step.
//!
//! - **[`Dispatcher`]**: tries the bridge's local API first (spaced by a
//!   [`CallGate`]) and falls back to the cloud API when a personal token is
//!   configured. Local failures without a fallback surface as
//!   [`CoreError::LocalAuth`] or [`CoreError::DataUpdate`].
//!
//! - **[`LockRegistry`]**: single-writer store of [`Lock`]s with `watch`
//!   snapshots. Only the [`reconcile`] functions mutate it.
//!
//! - **[`convert`]**: normalizes the cloud and local lock payload shapes into
//!   canonical fields.
//!
//! - **[`ClientObserver`]**: receives fallback, throttling and webhook
//!   decisions. Defaults to [`TracingObserver`].

pub mod client;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod observer;
pub mod reconcile;
pub mod store;
pub mod webhook;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{CommandAck, TedeeClient, WebhookHeaders};
pub use config::{ClientConfig, LocalConfig, SettleDelays};
pub use dispatch::{ApiSource, CallGate, Dispatched, Dispatcher, LocalOutcome, Operation};
pub use error::CoreError;
pub use model::{Bridge, DoorState, Lock, LockId, LockState, LockType};
pub use observer::{ClientEvent, ClientObserver, NoopObserver, TracingObserver};
pub use reconcile::{ReconcileReport, WebhookOutcome};
pub use store::{LockRegistry, LockSnapshot};
pub use webhook::{WebhookChange, WebhookEvent};

pub use tedee_api::{Callback, TokenMode, UnlockMode};
