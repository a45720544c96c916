//! Remote Operations Gateway.
//!
//! The four calls the registry backend exposes, behind an object-safe
//! trait so the state engine can run against a mock in tests. The gateway
//! owns the only timeout policy in the system; the engine above it never
//! races or cancels requests.

mod error;


pub use error::*;

use crate::model::{ResponseEnvelope, ServerDraft};
use async_trait::async_trait;
use std::time::Duration;

/// Default per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Uniform interface to the server registry backend.
///
/// # Object Safety
///
/// Designed to be used as `Arc<dyn RemoteOperations>`; all async methods
/// go through `async_trait`.
#[async_trait]
pub trait RemoteOperations: Send + Sync + 'static {
    /// Fetch the full server collection.
    async fn list_servers(&self) -> Result<ResponseEnvelope, GatewayError>;

    /// Health-check one server by address. The response envelope carries
    /// the resolved server in `data.server`.
    async fn ping_server(&self, address: &str) -> Result<ResponseEnvelope, GatewayError>;

    /// Create one server from an operator draft. The response envelope
    /// carries the created server (with its assigned id) in `data.server`.
    async fn save_server(&self, draft: &ServerDraft) -> Result<ResponseEnvelope, GatewayError>;

    /// Remove one server by id.
    async fn delete_server(&self, id: u64) -> Result<ResponseEnvelope, GatewayError>;
}

/// Production gateway speaking HTTP/JSON to the registry backend.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    timeout_seconds: u64,
}

impl HttpGateway {
    /// Create a gateway with its own pooled HTTP client.
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_seconds,
        }
    }

    /// Create a gateway with a custom HTTP client (for testing).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client, timeout_seconds: u64) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_seconds,
        }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify a reqwest error into a GatewayError.
    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(timeout_seconds)
        } else {
            // All other transport errors treated as connection failures
            GatewayError::ConnectionFailed(e.to_string())
        }
    }

    async fn execute(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<ResponseEnvelope, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(operation, status = status.as_u16(), "registry call failed");
            return Err(GatewayError::Http(status.as_u16()));
        }

        match response.json::<ResponseEnvelope>().await {
            Ok(envelope) => {
                tracing::debug!(
                    operation,
                    status = status.as_u16(),
                    message = %envelope.message,
                    "registry response"
                );
                Ok(envelope)
            }
            Err(e) => Err(GatewayError::Decode {
                status: status.as_u16(),
                detail: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RemoteOperations for HttpGateway {
    async fn list_servers(&self) -> Result<ResponseEnvelope, GatewayError> {
        let url = format!("{}/server/list", self.base_url);
        self.execute("list_servers", self.client.get(&url)).await
    }

    async fn ping_server(&self, address: &str) -> Result<ResponseEnvelope, GatewayError> {
        let url = format!("{}/server/ping/{}", self.base_url, address);
        self.execute("ping_server", self.client.get(&url)).await
    }

    async fn save_server(&self, draft: &ServerDraft) -> Result<ResponseEnvelope, GatewayError> {
        let url = format!("{}/server/save", self.base_url);
        self.execute("save_server", self.client.post(&url).json(draft))
            .await
    }

    async fn delete_server(&self, id: u64) -> Result<ResponseEnvelope, GatewayError> {
        let url = format!("{}/server/delete/{}", self.base_url, id);
        self.execute("delete_server", self.client.delete(&url)).await
    }
}
