//! # Curator Storage
//!
//! Storage backend client for the curator gateway.
//!
//! This crate provides:
//! - **Control plane**: Open, finalize, list, and delete operations against
//!   the backing object store
//! - **Transfer plane**: Raw content download and upload against
//!   backend-issued links
//! - **Backends**: An HTTP client for the real service and an in-memory
//!   backend for development and tests
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             Gateway Handlers            │
//! ├─────────────────────────────────────────┤
//! │          StorageGateway Trait           │
//! ├────────────────────┬────────────────────┤
//! │    HttpStorage     │   MemoryStorage    │
//! ├────────────────────┴────────────────────┤
//! │             Object Storage              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use curator_storage::{HttpStorage, StorageConfig, StorageGateway};
//!
//! let storage = HttpStorage::new(StorageConfig::new(endpoint, token, "gallery"))?;
//! let session = storage.initiate_upload("ADDR1.jpg", "image/jpeg", "pending").await?;
//! storage.complete_upload(&session.session_uuid).await?;
//! ```

pub mod error;
pub mod http;
pub mod memory;
pub mod types;

pub use error::{Result, StorageError};
pub use http::{HttpStorage, StorageConfig};
pub use memory::MemoryStorage;
pub use types::{RemoteObject, UploadSession};

use async_trait::async_trait;
use bytes::Bytes;

/// Default backend request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for storage backends
///
/// The first four operations are the control plane the gateway depends on;
/// `fetch_object` and `write_upload` move raw bytes through links the
/// control plane hands out. Any backend offering these is substitutable.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Open an upload session for a named file under a folder
    async fn initiate_upload(
        &self,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadSession>;

    /// Finalize an upload session after its bytes have been written
    async fn complete_upload(&self, session_uuid: &str) -> Result<()>;

    /// List every object in the configured collection
    async fn list_objects(&self) -> Result<Vec<RemoteObject>>;

    /// Delete an object by its backend identifier
    async fn delete_object(&self, uuid: &str) -> Result<()>;

    /// Download object content from a retrieval link
    async fn fetch_object(&self, link: &str) -> Result<Bytes>;

    /// Write content to an upload target issued by `initiate_upload`
    async fn write_upload(
        &self,
        upload_url: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<()>;
}
