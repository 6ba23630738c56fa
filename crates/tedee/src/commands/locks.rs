//! Lock listing and lock command handlers.

use serde::Serialize;
use tabled::Tabled;

use tedee_core::{CommandAck, Lock, LockId, TedeeClient};

use crate::cli::{GlobalOpts, LockTarget};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LockRow {
    #[tabled(rename = "ID")]
    id: LockId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Online")]
    online: &'static str,
    #[tabled(rename = "Door")]
    door: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn state_label(lock: &Lock) -> String {
    if lock.is_jammed() {
        format!("{} (jammed)", lock.state)
    } else {
        lock.state.to_string()
    }
}

impl From<&Lock> for LockRow {
    fn from(lock: &Lock) -> Self {
        let battery = lock.battery_level.map_or_else(String::new, |level| {
            if lock.is_charging {
                format!("{level}% ⚡")
            } else {
                format!("{level}%")
            }
        });
        Self {
            id: lock.id,
            name: lock.name.clone(),
            model: lock.lock_type.to_string(),
            state: state_label(lock),
            battery,
            online: yes_no(lock.is_connected),
            door: lock.door_state.to_string(),
        }
    }
}

fn print_locks(client: &TedeeClient, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = client.locks_snapshot();
    let out = output::render_list(
        &global.output,
        snap.as_slice(),
        |l| LockRow::from(l),
        |l| l.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(client: &mut TedeeClient, global: &GlobalOpts) -> Result<(), CliError> {
    client.get_locks().await?;
    print_locks(client, global)
}

pub async fn sync(client: &mut TedeeClient, global: &GlobalOpts) -> Result<(), CliError> {
    client.get_locks().await?;
    client.sync().await?;
    print_locks(client, global)
}

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Lock,
    Unlock,
    Open,
    Pull,
}

#[derive(Serialize)]
struct CommandResult<'a> {
    lock_id: LockId,
    name: &'a str,
    command: &'static str,
    source: String,
    settled_ms: u128,
    /// Present only with `--sync`.
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

/// Match a lock by numeric id or, case-insensitively, by name.
fn resolve_lock(client: &TedeeClient, identifier: &str) -> Result<LockId, CliError> {
    if let Some(lock) = identifier
        .parse::<LockId>()
        .ok()
        .and_then(|id| client.lock_by_id(id))
    {
        return Ok(lock.id);
    }
    client
        .locks()
        .iter()
        .find(|lock| lock.name.eq_ignore_ascii_case(identifier))
        .map(|lock| lock.id)
        .ok_or_else(|| CliError::LockNotFound {
            identifier: identifier.into(),
        })
}

pub async fn command(
    client: &mut TedeeClient,
    action: Action,
    target: LockTarget,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    client.get_locks().await?;
    let lock_id = resolve_lock(client, &target.lock)?;

    let ack: CommandAck = match action {
        Action::Lock => client.lock(lock_id).await?,
        Action::Unlock => client.unlock(lock_id).await?,
        Action::Open => client.open(lock_id).await?,
        Action::Pull => client.pull(lock_id).await?,
    };
    tracing::debug!(?ack, "command settled");

    if target.sync {
        client.sync().await?;
    }

    let name = client
        .lock_by_id(lock_id)
        .map(|lock| lock.name.clone())
        .unwrap_or_default();
    let result = CommandResult {
        lock_id,
        name: &name,
        command: ack.command,
        source: ack.source.to_string(),
        settled_ms: ack.settled_for.as_millis(),
        state: target
            .sync
            .then(|| client.lock_by_id(lock_id).map(state_label))
            .flatten(),
    };

    let out = output::render_single(
        &global.output,
        &result,
        |r| {
            let mut pairs = vec![
                ("Lock", format!("{} ({})", r.name, r.lock_id)),
                ("Command", format!("{} accepted via {}", r.command, r.source)),
                ("Waited", format!("{} ms", r.settled_ms)),
            ];
            if let Some(ref state) = r.state {
                pairs.push(("State", state.clone()));
            }
            output::render_detail(&pairs)
        },
        |r| r.lock_id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
