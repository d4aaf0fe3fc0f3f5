//! roster-svc library - Guild roster service
//!
//! Serves lookups against the guild roster and merges uploaded guild dumps
//! into it.

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod logging;
pub mod stats;
pub mod store;

use stats::ServiceStats;
use store::RosterStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RosterStore>,
    pub stats: Arc<ServiceStats>,
    /// File the service logs to, served by `/logs`
    pub log_file: Option<PathBuf>,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RosterStore, log_file: Option<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            store: Arc::new(store),
            stats: Arc::new(ServiceStats::new()),
            log_file,
            max_upload_bytes,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::middleware;
    use axum::routing::{get, post};

    Router::new()
        .route("/char/:character", get(api::get_member))
        .route("/main/:character", get(api::get_main))
        .route("/class/:class", get(api::get_class_members))
        .route("/guild", get(api::get_guild))
        .route(
            "/upload",
            post(api::upload_dump).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/logs", get(api::get_logs))
        .merge(api::health_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
