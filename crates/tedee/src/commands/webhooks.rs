//! Bridge webhook administration (local API only).

use std::collections::BTreeMap;

use tabled::Tabled;

use tedee_core::{Callback, TedeeClient, WebhookHeaders};

use crate::cli::{GlobalOpts, WebhookTarget, WebhooksArgs, WebhooksCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct WebhookRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Headers")]
    headers: String,
}

impl From<&Callback> for WebhookRow {
    fn from(cb: &Callback) -> Self {
        // Header values are credentials; show names only.
        let headers = cb
            .headers
            .iter()
            .flat_map(BTreeMap::keys)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: cb.id,
            url: cb.url.clone(),
            headers,
        }
    }
}

/// Parse repeated `NAME=VALUE` flags into the bridge's header list.
fn parse_headers(raw: &[String]) -> Result<WebhookHeaders, CliError> {
    raw.iter()
        .map(|pair| {
            let (name, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
                field: "header".into(),
                reason: format!("expected NAME=VALUE, got '{pair}'"),
            })?;
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "header".into(),
                    reason: format!("empty header name in '{pair}'"),
                });
            }
            Ok(BTreeMap::from([(name.trim().to_owned(), value.to_owned())]))
        })
        .collect()
}

pub async fn handle(
    client: &TedeeClient,
    args: WebhooksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WebhooksCommand::List => {
            let hooks = client.get_webhooks().await?;
            let out = output::render_list(
                &global.output,
                &hooks,
                |cb| WebhookRow::from(cb),
                |cb| cb.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
        }
        WebhooksCommand::Register(WebhookTarget { url, headers }) => {
            let id = client.register_webhook(&url, parse_headers(&headers)?).await?;
            output::print_output(&id.to_string(), global.quiet);
        }
        WebhooksCommand::Replace(WebhookTarget { url, headers }) => {
            client.update_webhooks(&url, parse_headers(&headers)?).await?;
        }
        WebhooksCommand::Delete { id } => client.delete_webhook(id).await,
        WebhooksCommand::DeleteAll => client.delete_webhooks().await,
        WebhooksCommand::Cleanup { host } => client.cleanup_webhooks_by_host(&host).await,
    }
    Ok(())
}
