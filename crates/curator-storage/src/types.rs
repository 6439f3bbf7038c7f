//! Wire types shared by the storage backends and their callers

use serde::{Deserialize, Serialize};

/// An upload session opened against the backend
///
/// The session itself lives backend-side; this is a pass-through handle.
/// The caller writes the file bytes to `upload_url` directly and then
/// finalizes the session by its `session_uuid`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    /// Backend identifier for the session
    pub session_uuid: String,
    /// One-time pre-authorized target the file bytes are written to
    pub upload_url: String,
    /// Identifier the finished object will carry
    pub file_uuid: String,
}

/// A single object in a backend listing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Backend identifier, used to address the object for deletion
    pub uuid: String,
    /// File name without any folder component
    pub name: String,
    /// Folder path the object is recorded under (may be empty)
    #[serde(default)]
    pub folder: String,
    /// Retrieval link for the object content, when the backend exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_link: Option<String>,
    /// Object size in bytes
    #[serde(default)]
    pub size: u64,
}
