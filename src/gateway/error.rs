//! Error types for remote operations.

use thiserror::Error;

/// Errors a remote operation can fail with.
///
/// The detailed form feeds logs; the operator-facing state stream carries
/// only [`operator_message`](GatewayError::operator_message), the uniform
/// template the backend contract prescribes for every failure.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed before any HTTP status was produced
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend answered with a non-success status
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Backend answered but the body was not a valid envelope
    #[error("invalid response body (HTTP {status}): {detail}")]
    Decode { status: u16, detail: String },
}

impl GatewayError {
    /// HTTP status code attached to the failure; 0 when the request never
    /// produced one (timeouts, refused connections).
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Http(status) => *status,
            GatewayError::Decode { status, .. } => *status,
            GatewayError::Timeout(_) | GatewayError::ConnectionFailed(_) => 0,
        }
    }

    /// The uniform message the dashboard displays for any remote failure.
    pub fn operator_message(&self) -> String {
        format!("An error occurred - Error code {}", self.status_code())
    }
}
