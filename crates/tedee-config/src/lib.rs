//! Shared configuration for Tedee tools.
//!
//! TOML profiles, credential resolution (env var or plaintext), and
//! translation to `tedee_core::ClientConfig`. Environment variables with the
//! `TEDEE_` prefix override file values; nested keys use `__`, e.g.
//! `TEDEE_PROFILES__HOME__LOCAL_HOST`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tedee_core::{ClientConfig, LocalConfig, TokenMode};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named bridge/account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile, falling back to `default_profile`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    10
}

/// A named profile: one Tedee account and/or one bridge.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Cloud personal key (plaintext; prefer `personal_token_env`).
    pub personal_token: Option<String>,

    /// Environment variable name containing the personal key.
    pub personal_token_env: Option<String>,

    /// Bridge IP address or hostname for the local API.
    pub local_host: Option<String>,

    /// Local API port (default 80).
    pub local_port: Option<u16>,

    /// Local API token (plaintext; prefer `local_token_env`).
    pub local_token: Option<String>,

    /// Environment variable name containing the local API token.
    pub local_token_env: Option<String>,

    /// "secure" (default) or "plain".
    pub local_token_mode: Option<TokenMode>,

    /// Only track locks paired with this bridge.
    pub bridge_id: Option<i64>,

    /// Override the cloud API base URL.
    pub cloud_url: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tedee", "tedee").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tedee");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TEDEE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn resolve_secret(env_name: Option<&String>, plaintext: Option<&String>) -> Option<SecretString> {
    // 1. Named env var
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Some(SecretString::from(val));
    }
    // 2. Plaintext in config
    plaintext.map(|val| SecretString::from(val.clone()))
}

/// Resolve the cloud personal key, if any.
pub fn resolve_personal_token(profile: &Profile) -> Option<SecretString> {
    resolve_secret(
        profile.personal_token_env.as_ref(),
        profile.personal_token.as_ref(),
    )
}

/// Resolve local API access. Host and token must both be present or both absent.
pub fn resolve_local(profile: &Profile) -> Result<Option<LocalConfig>, ConfigError> {
    let token = resolve_secret(profile.local_token_env.as_ref(), profile.local_token.as_ref());
    match (&profile.local_host, token) {
        (None, None) => Ok(None),
        (Some(host), Some(token)) => {
            let mut local = LocalConfig::new(host.clone(), token);
            if let Some(port) = profile.local_port {
                local.port = port;
            }
            local.token_mode = profile.local_token_mode.unwrap_or_default();
            Ok(Some(local))
        }
        (None, Some(_)) => Err(ConfigError::Validation {
            field: "local_host".into(),
            reason: "a local token is configured but no bridge host".into(),
        }),
        (Some(_), None) => Err(ConfigError::Validation {
            field: "local_token".into(),
            reason: "a bridge host is configured but no local token".into(),
        }),
    }
}

/// Build a `ClientConfig` from a profile.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let personal_token = resolve_personal_token(profile);
    let local = resolve_local(profile)?;
    if personal_token.is_none() && local.is_none() {
        return Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        });
    }

    let mut config = ClientConfig {
        personal_token,
        local,
        bridge_id: profile.bridge_id,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        ..ClientConfig::default()
    };

    if let Some(ref raw) = profile.cloud_url {
        config.cloud_url = raw.parse().map_err(|_| ConfigError::Validation {
            field: "cloud_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    Ok(config)
}
