//! Batch approval sync over the pending folder

use std::collections::HashSet;
use std::sync::Arc;

use curator_storage::StorageGateway;
use serde::Serialize;
use tracing::instrument;

use crate::folders::Folder;
use crate::index::FolderIndex;
use crate::mover::MoveEngine;

/// Most identifiers processed per sync request; the rest are dropped
pub const SYNC_BATCH_LIMIT: usize = 50;

/// One identifier whose object was moved to the approved folder
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MovedEntry {
    pub identifier: String,
    pub from: String,
    pub to: String,
}

/// One identifier that needed no move
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedEntry {
    pub identifier: String,
    pub reason: String,
}

/// One identifier whose move failed
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEntry {
    pub identifier: String,
    pub error: String,
}

/// Outcome of a sync request
///
/// Every processed identifier lands in exactly one of the three lists.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SyncReport {
    pub moved: Vec<MovedEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub errors: Vec<ErrorEntry>,
}

/// Drives the per-identifier moves for a sync request
pub struct SyncCoordinator {
    index: FolderIndex,
    mover: MoveEngine,
}

impl SyncCoordinator {
    /// Create a coordinator over a storage backend
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            index: FolderIndex::new(Arc::clone(&storage)),
            mover: MoveEngine::new(storage),
        }
    }

    /// Move the pending objects for the given identifiers into the
    /// approved folder
    ///
    /// The batch is capped at [`SYNC_BATCH_LIMIT`] identifiers and
    /// repeated identifiers are processed once. The pending folder is
    /// listed a single time up front; a failure of that listing fails
    /// the whole request, while per-identifier failures only produce
    /// error entries.
    #[instrument(skip(self, identifiers), fields(requested = identifiers.len()))]
    pub async fn sync(&self, identifiers: &[String]) -> curator_storage::Result<SyncReport> {
        let batch = bounded_batch(identifiers);
        let pending = self.index.keyed_by_identifier(Folder::Pending).await?;

        let mut report = SyncReport::default();
        for identifier in batch {
            let Some(object) = pending.get(identifier) else {
                report.skipped.push(SkippedEntry {
                    identifier: identifier.to_string(),
                    reason: "no pending object".to_string(),
                });
                continue;
            };

            match self.mover.move_object(object, Folder::Approved).await {
                Ok(()) => {
                    tracing::info!(identifier = %identifier, name = %object.name, "Approved object moved");
                    report.moved.push(MovedEntry {
                        identifier: identifier.to_string(),
                        from: format!("{}/{}", Folder::Pending, object.name),
                        to: format!("{}/{}", Folder::Approved, object.name),
                    });
                }
                Err(error) => {
                    tracing::error!(identifier = %identifier, error = %error, "Move failed");
                    report.errors.push(ErrorEntry {
                        identifier: identifier.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

/// Cap the batch at the limit, then drop repeated identifiers keeping
/// the first occurrence
fn bounded_batch(identifiers: &[String]) -> Vec<&String> {
    let capped = &identifiers[..identifiers.len().min(SYNC_BATCH_LIMIT)];
    let mut seen = HashSet::new();
    capped
        .iter()
        .filter(|identifier| seen.insert(identifier.as_str()))
        .collect()
}
