//! In-memory storage backend for development and tests

use crate::{Result, StorageError, StorageGateway, RemoteObject, UploadSession};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

const OBJECT_LINK_PREFIX: &str = "memory://objects/";
const UPLOAD_TARGET_PREFIX: &str = "memory://uploads/";

#[derive(Clone, Debug)]
struct StoredObject {
    name: String,
    folder: String,
    content: Bytes,
    content_type: String,
    /// Insertion order; listings are returned oldest first
    seq: u64,
}

#[derive(Clone, Debug)]
struct Staged {
    content: Bytes,
    content_type: String,
}

#[derive(Clone, Debug)]
struct OpenSession {
    file_uuid: String,
    file_name: String,
    folder: String,
    content_type: String,
    staged: Option<Staged>,
}

/// An in-memory storage backend
///
/// Objects live in process memory; content links and upload targets use the
/// `memory://` scheme understood by `fetch_object` and `write_upload`.
/// Clones share the same underlying store.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<DashMap<String, StoredObject>>,
    sessions: Arc<DashMap<String, OpenSession>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStorage {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of upload sessions that were opened but never completed
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Remove all objects and sessions
    pub fn clear(&self) {
        self.objects.clear();
        self.sessions.clear();
    }

    /// Insert an object directly, bypassing the upload protocol
    ///
    /// Returns the backend identifier of the new object. Used to seed
    /// fixtures in tests and demos.
    pub fn add_object(&self, name: &str, folder: &str, content: &[u8], content_type: &str) -> String {
        let uuid = Uuid::new_v4().to_string();
        self.objects.insert(
            uuid.clone(),
            StoredObject {
                name: name.to_string(),
                folder: folder.to_string(),
                content: Bytes::copy_from_slice(content),
                content_type: content_type.to_string(),
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            },
        );
        uuid
    }
}

#[async_trait]
impl StorageGateway for MemoryStorage {
    async fn initiate_upload(
        &self,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadSession> {
        let session_uuid = Uuid::new_v4().to_string();
        let file_uuid = Uuid::new_v4().to_string();

        self.sessions.insert(
            session_uuid.clone(),
            OpenSession {
                file_uuid: file_uuid.clone(),
                file_name: file_name.to_string(),
                folder: folder.to_string(),
                content_type: content_type.to_string(),
                staged: None,
            },
        );

        Ok(UploadSession {
            upload_url: format!("{}{}", UPLOAD_TARGET_PREFIX, session_uuid),
            session_uuid,
            file_uuid,
        })
    }

    async fn complete_upload(&self, session_uuid: &str) -> Result<()> {
        // Completing consumes the session; a second complete fails
        let (_, session) = self
            .sessions
            .remove(session_uuid)
            .ok_or_else(|| StorageError::SessionNotFound(session_uuid.to_string()))?;

        let (content, content_type) = match session.staged {
            Some(staged) => (staged.content, staged.content_type),
            None => (Bytes::new(), session.content_type),
        };

        self.objects.insert(
            session.file_uuid,
            StoredObject {
                name: session.file_name,
                folder: session.folder,
                content,
                content_type,
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            },
        );

        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<RemoteObject>> {
        let mut entries: Vec<(String, StoredObject)> = self
            .objects
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(_, object)| object.seq);

        Ok(entries
            .into_iter()
            .map(|(uuid, object)| RemoteObject {
                content_link: Some(format!("{}{}", OBJECT_LINK_PREFIX, uuid)),
                uuid,
                name: object.name,
                folder: object.folder,
                size: object.content.len() as u64,
            })
            .collect())
    }

    async fn delete_object(&self, uuid: &str) -> Result<()> {
        self.objects
            .remove(uuid)
            .ok_or_else(|| StorageError::ObjectNotFound(uuid.to_string()))?;
        Ok(())
    }

    async fn fetch_object(&self, link: &str) -> Result<Bytes> {
        let uuid = link
            .strip_prefix(OBJECT_LINK_PREFIX)
            .ok_or_else(|| StorageError::InvalidLink(link.to_string()))?;

        self.objects
            .get(uuid)
            .map(|entry| entry.value().content.clone())
            .ok_or_else(|| StorageError::ObjectNotFound(uuid.to_string()))
    }

    async fn write_upload(
        &self,
        upload_url: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let session_uuid = upload_url
            .strip_prefix(UPLOAD_TARGET_PREFIX)
            .ok_or_else(|| StorageError::InvalidLink(upload_url.to_string()))?;

        let mut session = self
            .sessions
            .get_mut(session_uuid)
            .ok_or_else(|| StorageError::SessionNotFound(session_uuid.to_string()))?;
        session.staged = Some(Staged {
            content,
            content_type: content_type.to_string(),
        });

        Ok(())
    }
}
