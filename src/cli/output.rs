//! Output formatting helpers for CLI commands

use crate::model::{ResponseEnvelope, Server, ServerStatus};
use crate::state::AppState;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// View model for server display
#[derive(Debug, Clone)]
pub struct ServerView {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub server_type: String,
    pub status: ServerStatus,
    pub memory: String,
    pub disk: String,
}

impl From<&Server> for ServerView {
    fn from(server: &Server) -> Self {
        Self {
            id: server.id,
            name: server.name.clone(),
            address: server.address.clone(),
            server_type: server.server_type.clone(),
            status: server.status,
            memory: server.memory.clone(),
            disk: server.disk.clone(),
        }
    }
}

/// Format servers as a table
pub fn format_servers_table(servers: &[ServerView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID", "Name", "Address", "Type", "Status", "Memory", "Disk",
    ]);

    for s in servers {
        let status_str = match s.status {
            ServerStatus::Up => format!("{} Up", "✓".green()),
            ServerStatus::Down => format!("{} Down", "✗".red()),
        };

        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.name),
            Cell::new(&s.address),
            Cell::new(&s.server_type),
            Cell::new(status_str),
            Cell::new(&s.memory),
            Cell::new(&s.disk),
        ]);
    }

    table.to_string()
}

/// Format a resolved envelope as a table followed by the API message
pub fn format_envelope(envelope: &ResponseEnvelope) -> String {
    let views: Vec<ServerView> = envelope
        .data
        .servers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(ServerView::from)
        .collect();

    format!("{}\n{}", format_servers_table(&views), envelope.message)
}

/// Format a resolved envelope as JSON in its wire shape
pub fn format_envelope_json(envelope: &ResponseEnvelope) -> String {
    serde_json::to_string_pretty(envelope).unwrap()
}

/// Get status icon for server status
pub fn status_icon(status: ServerStatus) -> &'static str {
    match status {
        ServerStatus::Up => "✓",
        ServerStatus::Down => "✗",
    }
}

/// Render one frame of the watch view for the current state
pub fn format_watch_frame(state: &AppState, pinging: Option<&str>) -> String {
    let mut frame = match state {
        AppState::Loading => "Loading servers...".to_string(),
        AppState::Loaded(envelope) => format!(
            "{}\nUpdated {} UTC",
            format_envelope(envelope),
            envelope.timestamp.format("%H:%M:%S")
        ),
        AppState::Error(message) => format!("{} {}", "✗".red(), message.red()),
    };

    if let Some(address) = pinging {
        frame.push_str(&format!("\n{} {}", "pinging".yellow(), address));
    }

    frame
}
