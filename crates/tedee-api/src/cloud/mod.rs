// Cloud API
//
// Vendor-hosted REST API at `https://api.tedee.com/api/v1.32/`.
// Authenticated with `Authorization: PersonalKey <token>`; every response
// is wrapped in a `{ result, success, errorMessages, statusCode }` envelope.

pub mod client;
pub mod endpoints;

pub use client::{CloudClient, is_personal_key_valid};

/// Versioned base URL of the cloud API.
pub const CLOUD_API_URL: &str = "https://api.tedee.com/api/v1.32/";
