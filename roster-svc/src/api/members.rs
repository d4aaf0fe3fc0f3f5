//! Roster queries

use axum::{
    extract::{Path, State},
    Json,
};

use roster_common::class_filter::{filter_by_class, is_known_class};
use roster_common::resolver::find_main;
use roster_common::{Error, MemberRecord};

use super::ApiError;
use crate::AppState;

/// GET /char/:character
///
/// Returns a single member, looked up case-insensitively.
pub async fn get_member(
    State(state): State<AppState>,
    Path(character): Path<String>,
) -> Result<Json<MemberRecord>, ApiError> {
    let roster = state.store.current();
    let member = roster
        .get(&character)
        .cloned()
        .ok_or(Error::MemberNotFound(character))?;
    Ok(Json(member))
}

/// GET /main/:character
///
/// Returns the member's main character, derived from an alt's public note.
pub async fn get_main(
    State(state): State<AppState>,
    Path(character): Path<String>,
) -> Result<Json<MemberRecord>, ApiError> {
    let roster = state.store.current();
    let member = roster
        .get(&character)
        .ok_or_else(|| Error::MemberNotFound(character.clone()))?;
    let main = find_main(&roster, member)?;
    Ok(Json(main.clone()))
}

/// GET /class/:class
///
/// Returns all members of the given classes. Several classes may be
/// requested separated by commas, e.g. `/class/cleric,druid`.
pub async fn get_class_members(
    State(state): State<AppState>,
    Path(class): Path<String>,
) -> Result<Json<Vec<MemberRecord>>, ApiError> {
    let identifiers: Vec<&str> = class
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    let roster = state.store.current();
    let members: Vec<MemberRecord> = filter_by_class(&roster, identifiers.as_slice())
        .into_iter()
        .cloned()
        .collect();

    if members.is_empty() {
        return Err(if identifiers.iter().any(|id| is_known_class(id)) {
            ApiError::NoClassMembers(class)
        } else {
            ApiError::UnknownClass(class)
        });
    }
    Ok(Json(members))
}

/// GET /guild
///
/// Returns every member in roster order.
pub async fn get_guild(State(state): State<AppState>) -> Json<Vec<MemberRecord>> {
    let roster = state.store.current();
    Json(roster.iter().cloned().collect())
}
