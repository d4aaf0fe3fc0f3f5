//! Health and identity endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use roster_common::Error;

use super::ApiError;
use crate::stats::format_uptime;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub git_hash: String,
    pub uptime: String,
    pub uptime_secs: u64,
    pub requests_handled: u64,
    pub errors: u64,
    /// Modification time of the dump backing the roster (RFC 3339)
    pub last_roster: String,
    pub roster_path: String,
    pub roster_count: usize,
    pub roster_file_size: u64,
    pub guild: String,
    pub server: String,
}

#[derive(Debug, Serialize)]
pub struct GuildNameResponse {
    pub guild: String,
}

#[derive(Debug, Serialize)]
pub struct ServerNameResponse {
    pub server: String,
}

/// GET /health
///
/// Service status plus details of the roster currently served. Fails when
/// the dump file backing the roster cannot be inspected.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let roster = state.store.current();
    let metadata = tokio::fs::metadata(roster.source_path())
        .await
        .map_err(Error::Io)?;
    let modified: DateTime<Utc> = metadata.modified().map_err(Error::Io)?.into();

    let identity = state.store.identity();
    let uptime = state.stats.uptime();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        module: "roster-svc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        uptime: format_uptime(uptime),
        uptime_secs: uptime.as_secs(),
        requests_handled: state.stats.requests(),
        errors: state.stats.errors(),
        last_roster: modified.to_rfc3339(),
        roster_path: roster.source_path().display().to_string(),
        roster_count: roster.len(),
        roster_file_size: metadata.len(),
        guild: identity.guild.clone(),
        server: identity.server.clone(),
    }))
}

/// GET /guildname
pub async fn guild_name(State(state): State<AppState>) -> Json<GuildNameResponse> {
    Json(GuildNameResponse {
        guild: state.store.identity().guild.clone(),
    })
}

/// GET /servername
pub async fn server_name(State(state): State<AppState>) -> Json<ServerNameResponse> {
    Json(ServerNameResponse {
        server: state.store.identity().server.clone(),
    })
}

/// Build health and identity routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/guildname", get(guild_name))
        .route("/servername", get(server_name))
}
