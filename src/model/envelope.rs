use super::server::Server;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of a [`ResponseEnvelope`]: the server collection or a single
/// resolved server, depending on the operation.
///
/// List responses carry `servers`; ping and save responses carry `server`.
/// Absent fields stay absent on the wire, so both are optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Full server collection, in backend insertion order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// The single server an operation resolved (ping, save)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,
}

/// Uniform wrapper the backend puts around every result.
///
/// `message` is not freeform: it is derived from the operation and its
/// outcome ("Servers retrieved", "Servers filtered by SERVER_UP status",
/// ...) and is rendered verbatim by the dashboard.
///
/// # Examples
///
/// ```
/// use serverdeck::model::ResponseEnvelope;
///
/// let envelope: ResponseEnvelope = serde_json::from_str(
///     r#"{"timestamp":"2025-05-19T10:15:30Z","statusCode":200,
///         "status":"OK","message":"Servers retrieved","data":{}}"#,
/// ).unwrap();
/// assert_eq!(envelope.status_code, 200);
/// assert!(envelope.data.servers.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// When the backend produced the response
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status the backend reports alongside the body
    pub status_code: u16,
    /// Textual status ("OK", "CREATED", ...)
    pub status: String,
    /// Operator-facing description of what happened
    pub message: String,
    /// Result payload
    #[serde(default)]
    pub data: Snapshot,
}

impl ResponseEnvelope {
    /// Baseline envelope for local-only operations that run before any
    /// snapshot has been fetched (e.g. a filter on an empty dashboard).
    pub fn empty() -> Self {
        Self {
            timestamp: Utc::now(),
            status_code: 200,
            status: "OK".to_string(),
            message: String::new(),
            data: Snapshot::default(),
        }
    }
}
