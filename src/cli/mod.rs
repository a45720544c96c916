//! CLI module for serverdeck
//!
//! Command-line interface definitions and handlers for the serverdeck
//! registry dashboard client.
//!
//! # Commands
//!
//! - `servers` - Inspect and manage registry servers (list, ping, add, remove)
//! - `watch` - Live auto-refreshing view of the registry
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Show the registry, only servers currently up
//! serverdeck servers list --status up
//!
//! # Re-check one server and print the patched list
//! serverdeck servers ping 192.168.1.58
//!
//! # Follow the registry with a 10 second refresh
//! serverdeck watch --interval 10
//!
//! # Generate shell completions
//! serverdeck completions bash > ~/.bash_completion.d/serverdeck
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod servers;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ServerdeckConfig;

/// serverdeck - Server registry dashboard client
#[derive(Parser, Debug)]
#[command(
    name = "serverdeck",
    version,
    about = "Reactive dashboard client for the server registry API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and manage registry servers
    #[command(subcommand)]
    Servers(ServersCommands),
    /// Watch the registry with live updates
    Watch(WatchArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum ServersCommands {
    /// Fetch and display the server list
    List(ServersListArgs),
    /// Re-check one server and show the patched list
    Ping(ServersPingArgs),
    /// Register a new server
    Add(ServersAddArgs),
    /// Remove a server by id
    Remove(ServersRemoveArgs),
}

/// Options shared by every command that talks to the registry API.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "serverdeck.toml")]
    pub config: PathBuf,

    /// Registry API base URL (overrides config)
    #[arg(long, env = "SERVERDECK_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ServersListArgs {
    /// Show only servers with this status (all, up, down)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct ServersPingArgs {
    /// Address of the server to re-check (e.g. 192.168.1.58)
    pub address: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct ServersAddArgs {
    /// Network address of the new server
    pub address: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Server type label (e.g. "Web Server", "Database")
    #[arg(short = 't', long = "type", default_value = "Generic")]
    pub server_type: String,

    /// Initial status (up, down)
    #[arg(short, long, default_value = "down")]
    pub status: String,

    /// Memory descriptor (e.g. "32 GB")
    #[arg(long, default_value = "n/a")]
    pub memory: String,

    /// Disk descriptor (e.g. "400 GB")
    #[arg(long, default_value = "n/a")]
    pub disk: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct ServersRemoveArgs {
    /// Id of the server to remove
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Refresh interval in seconds (overrides config)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Disable periodic refresh (fetch once, then only render pushed updates)
    #[arg(long)]
    pub no_refresh: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SERVERDECK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate an example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "serverdeck.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    connection: &ConnectionArgs,
) -> Result<ServerdeckConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if connection.config.exists() {
        ServerdeckConfig::load(Some(&connection.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        ServerdeckConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref api_url) = connection.api_url {
        config.api.base_url = api_url.clone();
    }

    config.validate()?;
    Ok(config)
}
