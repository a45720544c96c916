use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status of a monitored server, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    /// Server answered its last health check
    #[serde(rename = "SERVER_UP")]
    Up,
    /// Server missed its last health check
    #[serde(rename = "SERVER_DOWN")]
    Down,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Up => write!(f, "SERVER_UP"),
            ServerStatus::Down => write!(f, "SERVER_DOWN"),
        }
    }
}

/// One monitored host in the registry.
///
/// `id` is assigned by the backend on creation and never changes; it is
/// unique within a snapshot and is the key every merge operates on.
///
/// # Examples
///
/// ```
/// use serverdeck::model::{Server, ServerStatus};
///
/// let server: Server = serde_json::from_str(
///     r#"{"id":1,"name":"db-01","address":"192.168.1.58","type":"Database",
///         "status":"SERVER_UP","memory":"32 GB","disk":"400 GB",
///         "imageUrl":"http://localhost:8080/server/image/server1.png"}"#,
/// ).unwrap();
/// assert_eq!(server.status, ServerStatus::Up);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Backend-assigned identifier, stable for the server's lifetime
    pub id: u64,
    /// Human-readable name
    pub name: String,
    /// Network address health checks are sent to
    pub address: String,
    /// Free-form role label ("Web Server", "Database", ...)
    #[serde(rename = "type")]
    pub server_type: String,
    /// Last known health status
    pub status: ServerStatus,
    /// Installed memory, backend-formatted ("32 GB")
    pub memory: String,
    /// Disk capacity, backend-formatted ("400 GB")
    pub disk: String,
    /// Icon the dashboard renders for this server
    pub image_url: String,
}

/// Operator-entered fields posted to the save operation.
///
/// The backend assigns `id` and `imageUrl`, so a draft carries neither.
/// `Default` matches the add-server form reset: empty fields with status
/// `SERVER_DOWN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDraft {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub server_type: String,
    pub status: ServerStatus,
    pub memory: String,
    pub disk: String,
}

impl Default for ServerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            server_type: String::new(),
            status: ServerStatus::Down,
            memory: String::new(),
            disk: String::new(),
        }
    }
}
