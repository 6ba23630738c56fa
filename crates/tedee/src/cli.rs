//! Clap derive structures for the `tedee` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tedee -- control Tedee smart locks from the command line
#[derive(Debug, Parser)]
#[command(
    name = "tedee",
    version,
    about = "Control Tedee smart locks from the command line",
    long_about = "Talks to the bridge's local API when configured and falls back to\n\
        the Tedee cloud API when a personal token is available.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "TEDEE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Cloud personal key (overrides profile)
    #[arg(long, env = "TEDEE_PERSONAL_TOKEN", global = true, hide_env = true)]
    pub personal_token: Option<String>,

    /// Bridge IP address or hostname (overrides profile)
    #[arg(long, env = "TEDEE_LOCAL_HOST", global = true)]
    pub local_host: Option<String>,

    /// Bridge local API port
    #[arg(long, env = "TEDEE_LOCAL_PORT", global = true)]
    pub local_port: Option<u16>,

    /// Bridge local API token (overrides profile)
    #[arg(long, env = "TEDEE_LOCAL_TOKEN", global = true, hide_env = true)]
    pub local_token: Option<String>,

    /// Send the local token unsigned (bridge configured for plain tokens)
    #[arg(long, global = true)]
    pub plain_token: bool,

    /// Only show locks paired with this bridge
    #[arg(long, env = "TEDEE_BRIDGE_ID", global = true)]
    pub bridge_id: Option<i64>,

    /// Cloud API base URL
    #[arg(long, env = "TEDEE_CLOUD_URL", global = true, hide = true)]
    pub cloud_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TEDEE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "TEDEE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover locks and show their state
    #[command(alias = "ls")]
    Locks,

    /// Discover locks, then refresh their state
    Sync,

    /// Lock a lock
    Lock(LockTarget),

    /// Unlock a lock
    Unlock(LockTarget),

    /// Unlock and pull the latch
    Open(LockTarget),

    /// Pull the latch of an unlocked lock
    Pull(LockTarget),

    /// List bridges on the account (cloud)
    Bridges,

    /// Show the bridge behind the local API
    Bridge,

    /// Manage bridge webhooks (local API)
    #[command(alias = "wh")]
    Webhooks(WebhooksArgs),

    /// Check whether a personal key is accepted by the cloud
    CheckKey(CheckKeyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct LockTarget {
    /// Lock id or name
    pub lock: String,

    /// Refresh the lock state after the command settles
    #[arg(long)]
    pub sync: bool,
}

#[derive(Debug, Args)]
pub struct WebhooksArgs {
    #[command(subcommand)]
    pub command: WebhooksCommand,
}

#[derive(Debug, Subcommand)]
pub enum WebhooksCommand {
    /// List registered webhooks
    List,

    /// Register a webhook and print its id
    Register(WebhookTarget),

    /// Replace every webhook with a single one
    Replace(WebhookTarget),

    /// Delete one webhook
    Delete {
        /// Webhook id
        id: i64,
    },

    /// Delete every webhook
    DeleteAll,

    /// Delete every webhook whose URL contains HOST
    Cleanup {
        host: String,
    },
}

#[derive(Debug, Args)]
pub struct WebhookTarget {
    /// URL the bridge posts events to
    pub url: String,

    /// Header the bridge sends with each event (NAME=VALUE, repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CheckKeyArgs {
    /// Personal key to check (defaults to the configured personal token)
    pub token: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}
