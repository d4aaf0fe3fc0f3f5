//! HTTP API handlers for roster-svc

pub mod error;
pub mod health;
pub mod logs;
pub mod members;
pub mod upload;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;

pub use error::ApiError;
pub use health::health_routes;
pub use logs::get_logs;
pub use members::{get_class_members, get_guild, get_main, get_member};
pub use upload::upload_dump;

/// Middleware counting requests and error responses
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    state.stats.record(response.status());
    response
}
