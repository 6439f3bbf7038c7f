//! Folder-scoped views over the storage backend listing

use std::collections::HashMap;
use std::sync::Arc;

use curator_storage::{RemoteObject, Result, StorageGateway};

use crate::folders::Folder;

/// Extract the identifier from an object name
///
/// The identifier is everything before the final extension dot, so
/// `"ADDR1.jpg"` yields `"ADDR1"` and `"a.b.c"` yields `"a.b"`. Names
/// without an extension or with nothing before the dot have no
/// identifier.
pub fn identifier_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((identifier, _)) if !identifier.is_empty() => Some(identifier),
        _ => None,
    }
}

/// Folder-filtered index over the backend's flat object listing
///
/// The backend lists the whole collection in one call; this narrows that
/// listing to a single moderation folder.
pub struct FolderIndex {
    storage: Arc<dyn StorageGateway>,
}

impl FolderIndex {
    /// Create an index over a storage backend
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Self { storage }
    }

    /// List the objects that live in one folder
    pub async fn list_folder(&self, folder: Folder) -> Result<Vec<RemoteObject>> {
        let objects = self.storage.list_objects().await?;
        Ok(objects
            .into_iter()
            .filter(|object| in_folder(object, folder))
            .collect())
    }

    /// List one folder keyed by object identifier
    ///
    /// Objects without an identifier are dropped. When two objects share
    /// an identifier the one later in the listing wins.
    pub async fn keyed_by_identifier(&self, folder: Folder) -> Result<HashMap<String, RemoteObject>> {
        let objects = self.list_folder(folder).await?;
        let mut keyed = HashMap::new();
        for object in objects {
            if let Some(identifier) = identifier_of(&object.name) {
                keyed.insert(identifier.to_string(), object);
            }
        }
        Ok(keyed)
    }
}

fn in_folder(object: &RemoteObject, folder: Folder) -> bool {
    object.folder.trim_end_matches('/') == folder.as_str()
}
