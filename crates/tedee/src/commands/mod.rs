//! Command handlers. Each takes a configured client and global options.

pub mod bridges;
mod locks;
mod webhooks;

use tedee_core::TedeeClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a connected command to its handler.
pub async fn dispatch(
    cmd: Command,
    mut client: TedeeClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = match cmd {
        Command::Locks => locks::list(&mut client, global).await,
        Command::Sync => locks::sync(&mut client, global).await,
        Command::Lock(target) => locks::command(&mut client, locks::Action::Lock, target, global).await,
        Command::Unlock(target) => {
            locks::command(&mut client, locks::Action::Unlock, target, global).await
        }
        Command::Open(target) => locks::command(&mut client, locks::Action::Open, target, global).await,
        Command::Pull(target) => locks::command(&mut client, locks::Action::Pull, target, global).await,
        Command::Bridges => bridges::list(&client, global).await,
        Command::Bridge => bridges::local(&client, global).await,
        Command::Webhooks(args) => webhooks::handle(&client, args, global).await,
        Command::CheckKey(_) | Command::Completions(_) => Ok(()),
    };
    client.shutdown();
    result
}
