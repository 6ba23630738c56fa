//! Resolve the runtime client configuration from the config file, the
//! selected profile, and command-line overrides.

use tedee_config::{Profile, load_config_or_default, profile_to_client_config};
use tedee_core::{ClientConfig, TokenMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let mut cfg = load_config_or_default();
    let name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let mut profile = match cfg.profiles.remove(&name) {
        Some(profile) => profile,
        // An explicitly requested profile must exist; the implicit default may not.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                path: tedee_config::config_path().display().to_string(),
            });
        }
        None => Profile::default(),
    };

    apply_overrides(&mut profile, global);
    Ok(profile_to_client_config(&profile, &name, &cfg.defaults)?)
}

/// Command-line flags win over profile values.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref token) = global.personal_token {
        profile.personal_token = Some(token.clone());
        profile.personal_token_env = None;
    }
    if let Some(ref host) = global.local_host {
        profile.local_host = Some(host.clone());
    }
    if let Some(port) = global.local_port {
        profile.local_port = Some(port);
    }
    if let Some(ref token) = global.local_token {
        profile.local_token = Some(token.clone());
        profile.local_token_env = None;
    }
    if global.plain_token {
        profile.local_token_mode = Some(TokenMode::Plain);
    }
    if let Some(id) = global.bridge_id {
        profile.bridge_id = Some(id);
    }
    if let Some(ref url) = global.cloud_url {
        profile.cloud_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}
