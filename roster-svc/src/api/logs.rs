//! Log file access

use axum::extract::State;

use roster_common::Error;

use super::ApiError;
use crate::AppState;

/// GET /logs
///
/// Returns the service log file as plain text.
pub async fn get_logs(State(state): State<AppState>) -> Result<String, ApiError> {
    let path = state.log_file.as_ref().ok_or(ApiError::LogsUnavailable)?;
    let contents = tokio::fs::read_to_string(path).await.map_err(Error::Io)?;
    Ok(contents)
}
