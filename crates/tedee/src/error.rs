//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tedee_config::ConfigError;
use tedee_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const RATE_LIMITED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tedee::auth_failed),
        help("Check the personal key in the Tedee portal under Personal Access Keys.")
    )]
    AuthFailed { message: String },

    #[error("The bridge rejected the local API token")]
    #[diagnostic(
        code(tedee::local_auth_failed),
        help(
            "Check the API token in the Tedee app under Bridge > Settings > Local API.\n\
             Use --plain-token if the bridge is set to send tokens unencrypted,\n\
             or configure a personal token to fall back to the cloud."
        )
    )]
    LocalAuthFailed {
        #[source]
        source: CoreError,
    },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(tedee::no_credentials),
        help(
            "Pass --personal-token, or --local-host with --local-token,\n\
             or add a profile to the config file."
        )
    )]
    NoCredentials { profile: String },

    // ── Connectivity ─────────────────────────────────────────────────

    #[error("Local API call failed")]
    #[diagnostic(
        code(tedee::local_failed),
        help("Check that the bridge is reachable and the local API is enabled.")
    )]
    LocalFailed {
        #[source]
        source: CoreError,
    },

    #[error("Rate limited by the Tedee API")]
    #[diagnostic(code(tedee::rate_limited), help("Wait a moment and try again."))]
    RateLimited { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("lock '{identifier}' not found")]
    #[diagnostic(code(tedee::not_found), help("Run: tedee locks"))]
    LockNotFound { identifier: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(tedee::api_error))]
    Api { message: String },

    #[error("{message}")]
    #[diagnostic(code(tedee::webhook))]
    Webhook { message: String },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tedee::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tedee::profile_not_found),
        help("Expected at: {path}")
    )]
    ProfileNotFound { name: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(tedee::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::LocalAuthFailed { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::LocalFailed { .. } => exit_code::CONNECTION,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::LockNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Auth { message } => CliError::AuthFailed { message },
            err @ CoreError::LocalAuth { .. } => CliError::LocalAuthFailed { source: err },
            err @ CoreError::DataUpdate { .. } => CliError::LocalFailed { source: err },
            CoreError::RateLimit { message } => CliError::RateLimited { message },
            CoreError::Webhook { message } => CliError::Webhook { message },
            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
            other => CliError::Api {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                path: tedee_config::config_path().display().to_string(),
            },
            ConfigError::Figment(err) => CliError::Config(err),
            ConfigError::Io(err) => CliError::Io(err),
            ConfigError::Serialization(err) => CliError::Validation {
                field: "config".into(),
                reason: err.to_string(),
            },
        }
    }
}
