//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use curator_storage::{HttpStorage, MemoryStorage, StorageConfig, StorageGateway};

use crate::config::GatewayConfig;

/// Shared application state
pub struct AppState {
    /// Gateway configuration
    pub config: GatewayConfig,
    /// Storage backend used by every handler
    pub storage: Arc<dyn StorageGateway>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state from configuration
    ///
    /// Picks the in-memory store when `use_memory_store` is set,
    /// otherwise requires a storage endpoint and token.
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn StorageGateway> = if config.use_memory_store {
            tracing::warn!("Using in-memory storage (data will not persist)");
            Arc::new(MemoryStorage::new())
        } else {
            let endpoint = config
                .storage_endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage endpoint is required unless --memory-store is set"))?;
            let token = config
                .storage_token
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage token is required unless --memory-store is set"))?;

            tracing::info!(endpoint = %endpoint, collection = %config.storage_collection, "Using remote storage backend");

            let storage_config = StorageConfig::new(endpoint, token, config.storage_collection.clone())
                .with_timeout(Duration::from_secs(config.request_timeout_secs));
            Arc::new(HttpStorage::new(storage_config)?)
        };

        Ok(Self { config, storage })
    }

    /// Create application state with an explicit storage backend
    pub fn with_storage(config: GatewayConfig, storage: Arc<dyn StorageGateway>) -> Self {
        Self { config, storage }
    }
}
