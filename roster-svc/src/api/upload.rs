//! Guild dump upload

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::ApiError;
use crate::AppState;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub members: usize,
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadUpload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

/// POST /upload
///
/// Accepts a guild dump as the multipart field `file`. The file name must
/// follow the dump naming convention for this service's guild and server.
/// The dump is merged into the current roster and replaces the previous
/// dump file on disk.
pub async fn upload_dump(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or(ApiError::MissingFile)?;
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) = upload.ok_or(ApiError::MissingFile)?;
    info!("Received dump {} ({} bytes)", file_name, bytes.len());

    let store = state.store.clone();
    let outcome = tokio::task::spawn_blocking(move || store.submit(&file_name, &bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("merge task failed: {}", e)))??;

    Ok(Json(UploadResponse {
        message: format!("'{}' uploaded and merged successfully", outcome.file_name),
        members: outcome.members,
        added: outcome.summary.added,
        updated: outcome.summary.updated,
        removed: outcome.summary.removed,
    }))
}
