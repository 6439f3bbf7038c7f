//! Upload session handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::folders::Folder;
use crate::{ApiError, AppState};

/// Request body for POST /initiate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateUploadRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub directory_path: Option<String>,
}

/// Response body for POST /initiate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateUploadResponse {
    pub success: bool,
    pub session_uuid: String,
    pub upload_url: String,
    pub file_uuid: String,
}

/// Request body for POST /complete
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadRequest {
    #[serde(default)]
    pub session_uuid: Option<String>,
}

/// Response body for POST /complete
#[derive(Debug, Serialize)]
pub struct CompleteUploadResponse {
    pub success: bool,
    pub message: String,
}

/// POST /initiate - open an upload session with the storage backend
///
/// The caller uploads the file bytes to the returned `uploadUrl`
/// itself, then confirms via POST /complete.
pub async fn initiate_upload(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InitiateUploadRequest>, JsonRejection>,
) -> Result<Json<InitiateUploadResponse>, ApiError> {
    let Json(request) = payload?;

    let file_name = required_field(request.file_name, "fileName")?;
    let content_type = required_field(request.content_type, "contentType")?;
    let directory_path = required_field(request.directory_path, "directoryPath")?;
    let folder = Folder::parse(&directory_path).ok_or_else(|| {
        ApiError::validation("directoryPath must be one of: pending, approved, rejected")
    })?;

    let session = state
        .storage
        .initiate_upload(&file_name, &content_type, folder.as_str())
        .await?;

    tracing::info!(
        file_name = %file_name,
        folder = %folder,
        session = %session.session_uuid,
        "Upload session opened"
    );

    Ok(Json(InitiateUploadResponse {
        success: true,
        session_uuid: session.session_uuid,
        upload_url: session.upload_url,
        file_uuid: session.file_uuid,
    }))
}

/// POST /complete - confirm an upload session
pub async fn complete_upload(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompleteUploadRequest>, JsonRejection>,
) -> Result<Json<CompleteUploadResponse>, ApiError> {
    let Json(request) = payload?;

    let session_uuid = required_field(request.session_uuid, "sessionUuid")?;
    state.storage.complete_upload(&session_uuid).await?;

    tracing::info!(session = %session_uuid, "Upload session completed");

    Ok(Json(CompleteUploadResponse {
        success: true,
        message: "upload completed".to_string(),
    }))
}

fn required_field(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::validation(format!("{} is required", name))),
    }
}
