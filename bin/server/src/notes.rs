//! Note endpoints.
//!
//! Every handler takes `RequireUser` first, so an unauthenticated request is
//! rejected before its body is read or storage is touched. The owner passed
//! to `NoteBook` always comes from the session, never from the request.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use notekeep_core::NoteId;
use serde_json::{Value, json};
use std::str::FromStr;

use crate::app::AppState;
use crate::auth::RequireUser;
use crate::error::ApiError;
use crate::types::{NewNote, NoteView};

/// `GET /api/notes`: the caller's notes, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state.notes.list(user.user_id()).await?;
    Ok(Json(notes.iter().map(NoteView::from).collect()))
}

/// `POST /api/notes`: adds a note with the trimmed text.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    body: Result<Json<NewNote>, JsonRejection>,
) -> Result<Json<NoteView>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected note body");
        ApiError::validation("Invalid request body")
    })?;

    let text = body.text.unwrap_or_default();
    let note = state.notes.add(user.user_id(), &text).await?;
    Ok(Json(NoteView::from(&note)))
}

/// `DELETE /api/notes/{id}`: deletes one of the caller's notes.
///
/// Unknown ids, malformed ids and notes owned by someone else all answer 404.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = NoteId::from_str(&id).map_err(|_| ApiError::NotFound)?;
    state.notes.remove(user.user_id(), id).await?;
    Ok(Json(json!({ "success": true })))
}
