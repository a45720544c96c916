//! Registry API configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the server registry backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the registry API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: crate::gateway::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
