//! Bridge listing and personal key check.

use secrecy::SecretString;
use tabled::Tabled;

use tedee_core::{Bridge, ClientConfig, TedeeClient};

use crate::cli::{CheckKeyArgs, GlobalOpts};
use crate::config::build_client_config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BridgeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Bridge> for BridgeRow {
    fn from(b: &Bridge) -> Self {
        Self {
            id: b.id,
            serial: b.serial.clone(),
            name: b.name.clone(),
        }
    }
}

pub async fn list(client: &TedeeClient, global: &GlobalOpts) -> Result<(), CliError> {
    let bridges = client.get_bridges().await?;
    let out = output::render_list(
        &global.output,
        &bridges,
        |b| BridgeRow::from(b),
        |b| b.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn local(client: &TedeeClient, global: &GlobalOpts) -> Result<(), CliError> {
    let bridge = client.get_local_bridge().await?;
    let out = output::render_single(
        &global.output,
        &bridge,
        |b| output::render_detail(&[("Name", b.name.clone()), ("Serial", b.serial.clone())]),
        |b| b.serial.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Runs without a configured client: the key under test is the only credential.
pub async fn check_key(args: CheckKeyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let configured = build_client_config(global).ok();
    let token = args
        .token
        .map(SecretString::from)
        .or_else(|| configured.as_ref().and_then(|c| c.personal_token.clone()))
        .ok_or_else(|| CliError::Validation {
            field: "token".into(),
            reason: "pass a key or configure a personal token".into(),
        })?;

    let mut config = ClientConfig::cloud(token.clone());
    if let Some(configured) = configured {
        config.cloud_url = configured.cloud_url;
        config.timeout = configured.timeout;
    }
    let client = TedeeClient::new(config)?;

    let valid = client.validate_personal_key(&token).await;
    client.shutdown();
    if valid {
        output::print_output("valid", global.quiet);
        Ok(())
    } else {
        Err(CliError::AuthFailed {
            message: "personal key rejected by the cloud API".into(),
        })
    }
}
