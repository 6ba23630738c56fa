// Local bridge API
//
// Served by the bridge on the LAN at `http://{host}:{port}/v1.0/`.
// Authenticated with the `api_token` header; see `crate::auth`.

pub mod client;
pub mod endpoints;

pub use client::LocalClient;

/// Default port of the bridge's HTTP server.
pub const LOCAL_API_PORT: u16 = 80;

/// Version segment of every local API path.
pub const LOCAL_API_VERSION: &str = "v1.0";
