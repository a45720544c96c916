//! Handlers for the `servers` subcommands.
//!
//! Each handler drives the state controller through one remote operation
//! and renders the resolved state as a table or a JSON document. Commands
//! that patch the snapshot (ping, add, remove) fetch the list first so the
//! merge has something to patch into.

use super::output;
use super::{
    load_config_with_overrides, ServersAddArgs, ServersListArgs, ServersPingArgs,
    ServersRemoveArgs,
};
use crate::config::ServerdeckConfig;
use crate::filter::StatusFilter;
use crate::gateway::HttpGateway;
use crate::model::{ServerDraft, ServerStatus};
use crate::state::{AppState, StateController};
use std::sync::Arc;

/// Build a state controller wired to the registry endpoint from `config`.
pub fn build_controller(config: &ServerdeckConfig) -> Arc<StateController> {
    let gateway = HttpGateway::new(config.api.base_url.clone(), config.api.timeout_seconds);
    Arc::new(StateController::new(Arc::new(gateway)))
}

/// Handle `servers list`.
pub async fn handle_servers_list(
    args: &ServersListArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let filter = match args.status {
        Some(ref raw) => Some(raw.parse::<StatusFilter>()?),
        None => None,
    };

    let config = load_config_with_overrides(&args.connection)?;
    let controller = build_controller(&config);

    let mut state = controller.refresh_list().await;
    if let (Some(AppState::Loaded(_)), Some(filter)) = (&state, filter) {
        state = controller.filter_servers(filter);
    }

    render_outcome(state, args.json)
}

/// Handle `servers ping`.
pub async fn handle_servers_ping(
    args: &ServersPingArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.connection)?;
    let controller = build_controller(&config);

    if let Some(AppState::Error(message)) = controller.refresh_list().await {
        return Err(message.into());
    }

    let state = controller.ping_server(&args.address).await;
    render_outcome(state, args.json)
}

/// Handle `servers add`.
pub async fn handle_servers_add(
    args: &ServersAddArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let status = parse_server_status(&args.status)?;

    let config = load_config_with_overrides(&args.connection)?;
    let controller = build_controller(&config);

    if let Some(AppState::Error(message)) = controller.refresh_list().await {
        return Err(message.into());
    }

    let draft = ServerDraft {
        name: args.name.clone(),
        address: args.address.clone(),
        server_type: args.server_type.clone(),
        status,
        memory: args.memory.clone(),
        disk: args.disk.clone(),
    };

    let state = controller.save_server(&draft).await;
    render_outcome(state, args.json)
}

/// Handle `servers remove`.
pub async fn handle_servers_remove(
    args: &ServersRemoveArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.connection)?;
    let controller = build_controller(&config);

    if let Some(AppState::Error(message)) = controller.refresh_list().await {
        return Err(message.into());
    }

    let state = controller.delete_server(args.id).await;
    render_outcome(state, args.json)
}

/// Render the resolved state, turning an error state into a CLI error.
fn render_outcome(
    state: Option<AppState>,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    match state {
        Some(AppState::Loaded(envelope)) => {
            if json {
                Ok(output::format_envelope_json(&envelope))
            } else {
                Ok(output::format_envelope(&envelope))
            }
        }
        Some(AppState::Error(message)) => Err(message.into()),
        Some(AppState::Loading) | None => Err("operation did not produce a result".into()),
    }
}

/// Parse a user-supplied status value for `servers add`.
fn parse_server_status(value: &str) -> Result<ServerStatus, Box<dyn std::error::Error>> {
    match value.to_lowercase().as_str() {
        "up" | "server_up" => Ok(ServerStatus::Up),
        "down" | "server_down" => Ok(ServerStatus::Down),
        _ => Err(format!("Invalid status: {}. Use: up, down", value).into()),
    }
}
