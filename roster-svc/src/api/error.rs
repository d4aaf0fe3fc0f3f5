//! Error responses
//!
//! Every failure is returned as `{"error": message, "kind": code}` so that
//! callers can tell a missing member from a rejected upload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use roster_common::ErrorKind;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Roster(#[from] roster_common::Error),

    /// Upload request without a `file` part carrying a file name
    #[error("missing file")]
    MissingFile,

    #[error("invalid upload: {message}")]
    BadUpload { status: StatusCode, message: String },

    /// No requested identifier names a class
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("No players for provided class: {0}")]
    NoClassMembers(String),

    #[error("log file unavailable")]
    LogsUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Roster(e) => match e.kind() {
                ErrorKind::MemberNotFound
                | ErrorKind::NoAnnotation
                | ErrorKind::AmbiguousAnnotation
                | ErrorKind::MalformedAnnotation => StatusCode::NOT_FOUND,
                ErrorKind::SnapshotUnreadable | ErrorKind::NamingMismatch => StatusCode::BAD_REQUEST,
                ErrorKind::PersistFailure
                | ErrorKind::NoSnapshotFound
                | ErrorKind::Config
                | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MissingFile | ApiError::UnknownClass(_) => StatusCode::BAD_REQUEST,
            ApiError::BadUpload { status, .. } => *status,
            ApiError::NoClassMembers(_) | ApiError::LogsUnavailable => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Code reported in the `kind` field
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Roster(e) => e.kind().as_str(),
            ApiError::MissingFile => "missing_file",
            ApiError::BadUpload { .. } => "bad_upload",
            ApiError::UnknownClass(_) => "unknown_class",
            ApiError::NoClassMembers(_) => "no_class_members",
            ApiError::LogsUnavailable => "logs_unavailable",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(kind = self.kind(), "{}", message);
        } else {
            warn!(kind = self.kind(), "{}", message);
        }

        let body = Json(json!({
            "error": message,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}
