//! Shared test utilities for serverdeck integration tests.
//!
//! Provides reusable builders for servers, envelopes and wire-format JSON
//! bodies to reduce duplication across test files.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use serverdeck::model::{ResponseEnvelope, Server, ServerDraft, ServerStatus, Snapshot};

/// Create a test server with sensible defaults.
pub fn make_server(id: u64, name: &str, status: ServerStatus) -> Server {
    Server {
        id,
        name: name.to_string(),
        address: format!("192.168.1.{}", 50 + id),
        server_type: "Web Server".to_string(),
        status,
        memory: "32 GB".to_string(),
        disk: "400 GB".to_string(),
        image_url: format!("https://registry.local/images/{}.png", id),
    }
}

/// Create a draft for the save operation.
pub fn make_draft(name: &str, address: &str) -> ServerDraft {
    ServerDraft {
        name: name.to_string(),
        address: address.to_string(),
        server_type: "Database".to_string(),
        status: ServerStatus::Down,
        memory: "64 GB".to_string(),
        disk: "2 TB".to_string(),
    }
}

/// Envelope carrying a full server list.
pub fn list_envelope(message: &str, servers: Vec<Server>) -> ResponseEnvelope {
    ResponseEnvelope {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap(),
        status_code: 200,
        status: "OK".to_string(),
        message: message.to_string(),
        data: Snapshot {
            servers: Some(servers),
            server: None,
        },
    }
}

/// Envelope carrying a single server payload.
pub fn single_envelope(message: &str, server: Server) -> ResponseEnvelope {
    ResponseEnvelope {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 10, 9, 31, 0).unwrap(),
        status_code: 200,
        status: "OK".to_string(),
        message: message.to_string(),
        data: Snapshot {
            servers: None,
            server: Some(server),
        },
    }
}

/// Envelope carrying only metadata, no payload.
pub fn meta_envelope(message: &str) -> ResponseEnvelope {
    ResponseEnvelope {
        timestamp: Utc.with_ymd_and_hms(2026, 1, 10, 9, 32, 0).unwrap(),
        status_code: 200,
        status: "OK".to_string(),
        message: message.to_string(),
        data: Snapshot {
            servers: None,
            server: None,
        },
    }
}

/// Wire-format JSON for an envelope (camelCase field names).
pub fn wire_json(envelope: &ResponseEnvelope) -> serde_json::Value {
    serde_json::to_value(envelope).unwrap()
}
