//! Gateway configuration

use serde::{Deserialize, Serialize};

/// Configuration for the curator gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the storage backend API
    pub storage_endpoint: Option<String>,
    /// Access token for the storage backend
    pub storage_token: Option<String>,
    /// Storage collection that holds the moderated folders
    pub storage_collection: String,
    /// Serve from an in-memory store instead of the remote backend
    pub use_memory_store: bool,
    /// Origins allowed to call the gateway
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Timeout for backend requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            storage_endpoint: None,
            storage_token: None,
            storage_collection: "gallery".to_string(),
            use_memory_store: false,
            allowed_origins: Vec::new(),
            // The gateway only handles JSON control messages; file bytes
            // travel directly between the browser and the storage backend.
            max_body_size: 1024 * 1024,
            request_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check whether an origin is on the allow-list (exact match)
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}
