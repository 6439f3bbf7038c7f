//! Test doubles for exercising failure paths

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use curator_storage::{
    MemoryStorage, RemoteObject, Result, StorageError, StorageGateway, UploadSession,
};

/// Storage double that fails selected operations
///
/// Delegates to an in-memory store until a failure is armed.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    transfer_failure: Arc<AtomicBool>,
    delete_failure: Arc<Mutex<Option<String>>>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write_upload fail
    pub fn fail_transfer(&self) {
        self.transfer_failure.store(true, Ordering::SeqCst);
    }

    /// Make deleting the given object fail
    pub fn fail_delete(&self, uuid: &str) {
        *self.delete_failure.lock().unwrap() = Some(uuid.to_string());
    }
}

#[async_trait]
impl StorageGateway for FlakyStorage {
    async fn initiate_upload(
        &self,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadSession> {
        self.inner.initiate_upload(file_name, content_type, folder).await
    }

    async fn complete_upload(&self, session_uuid: &str) -> Result<()> {
        self.inner.complete_upload(session_uuid).await
    }

    async fn list_objects(&self) -> Result<Vec<RemoteObject>> {
        self.inner.list_objects().await
    }

    async fn delete_object(&self, uuid: &str) -> Result<()> {
        if self.delete_failure.lock().unwrap().as_deref() == Some(uuid) {
            return Err(StorageError::Upstream {
                status: 500,
                message: "injected delete failure".to_string(),
            });
        }
        self.inner.delete_object(uuid).await
    }

    async fn fetch_object(&self, link: &str) -> Result<Bytes> {
        self.inner.fetch_object(link).await
    }

    async fn write_upload(&self, upload_url: &str, content: Bytes, content_type: &str) -> Result<()> {
        if self.transfer_failure.load(Ordering::SeqCst) {
            return Err(StorageError::Upstream {
                status: 500,
                message: "injected transfer failure".to_string(),
            });
        }
        self.inner.write_upload(upload_url, content, content_type).await
    }
}
