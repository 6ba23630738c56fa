// tedee-api: Async Rust client for the Tedee cloud API and the bridge's local API

pub mod auth;
pub mod cloud;
pub mod error;
pub mod local;
pub mod models;
pub mod request;
pub mod transport;

pub use auth::{LocalToken, TokenMode, compute_local_token};
pub use cloud::CloudClient;
pub use error::Error;
pub use local::LocalClient;
pub use models::{BridgeEntry, Callback, CallbackRequest};
pub use request::{ApiRequest, UnlockMode};
pub use transport::{HttpTransport, TransportConfig};
