//! Copy-then-delete object moves between folders

use std::fmt;
use std::sync::Arc;

use curator_storage::{RemoteObject, StorageError, StorageGateway};
use thiserror::Error;
use tracing::instrument;

use crate::folders::Folder;

/// Stage of the copy phase that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStep {
    Fetch,
    Initiate,
    Transfer,
    Complete,
}

impl MoveStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Initiate => "initiate",
            Self::Transfer => "transfer",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from moving an object between folders
#[derive(Error, Debug)]
pub enum MoveError {
    /// The listing entry carries no download link
    #[error("object {0} has no content link")]
    MissingContentLink(String),

    /// The copy phase failed; the source object is untouched
    #[error("copy failed at {step}: {error}")]
    Copy {
        step: MoveStep,
        #[source]
        error: StorageError,
    },

    /// The copy landed but the source could not be removed
    #[error("source delete failed after copy: {error}")]
    DeleteSource {
        #[source]
        error: StorageError,
    },
}

/// Moves objects between folders via copy-then-delete
///
/// The backend has no rename, so a move is: fetch the source bytes,
/// open an upload session in the destination folder, write the bytes,
/// complete the session, delete the source. The source delete only
/// runs once the destination copy is fully committed, so a failure
/// mid-way never loses the object.
pub struct MoveEngine {
    storage: Arc<dyn StorageGateway>,
}

impl MoveEngine {
    /// Create a move engine over a storage backend
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Self { storage }
    }

    /// Move one object into the given folder, keeping its name
    #[instrument(skip(self, object), fields(name = %object.name, uuid = %object.uuid, to = %to))]
    pub async fn move_object(&self, object: &RemoteObject, to: Folder) -> Result<(), MoveError> {
        let link = object
            .content_link
            .as_deref()
            .ok_or_else(|| MoveError::MissingContentLink(object.name.clone()))?;

        let content = self
            .storage
            .fetch_object(link)
            .await
            .map_err(|error| MoveError::Copy { step: MoveStep::Fetch, error })?;

        let content_type = detect_content_type(&object.name);

        let session = self
            .storage
            .initiate_upload(&object.name, &content_type, to.as_str())
            .await
            .map_err(|error| MoveError::Copy { step: MoveStep::Initiate, error })?;

        self.storage
            .write_upload(&session.upload_url, content, &content_type)
            .await
            .map_err(|error| MoveError::Copy { step: MoveStep::Transfer, error })?;

        self.storage
            .complete_upload(&session.session_uuid)
            .await
            .map_err(|error| MoveError::Copy { step: MoveStep::Complete, error })?;

        self.storage
            .delete_object(&object.uuid)
            .await
            .map_err(|error| MoveError::DeleteSource { error })?;

        Ok(())
    }
}

/// Guess the content type from the object name's extension
fn detect_content_type(name: &str) -> String {
    mime_guess::from_path(name).first_or_octet_stream().to_string()
}
