//! Approval sync handler

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::sync::{SyncCoordinator, SyncReport};
use crate::{ApiError, AppState};

/// Request body for POST /sync-approved-members
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
}

/// Response body for POST /sync-approved-members
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: SyncReport,
}

/// POST /sync-approved-members - move newly approved members' pending
/// photos into the approved folder
pub async fn sync_approved_members(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SyncRequest>, JsonRejection>,
) -> Result<Json<SyncResponse>, ApiError> {
    let Json(request) = payload?;

    let addresses = request
        .addresses
        .ok_or_else(|| ApiError::validation("addresses is required"))?;

    let coordinator = SyncCoordinator::new(Arc::clone(&state.storage));
    let report = coordinator.sync(&addresses).await?;

    tracing::info!(
        moved = report.moved.len(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "Sync completed"
    );

    Ok(Json(SyncResponse { success: true, report }))
}
