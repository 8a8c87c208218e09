use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use linq_store::queries::notes::{self, NoteRow};

use crate::contacts::{non_empty, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

const NOT_FOUND: &str = "Note not found";

/// Clients send the note text under any of three keys.
#[derive(Debug, Default, Deserialize)]
pub struct NoteInput {
    pub body: Option<String>,
    pub note_body: Option<String>,
    pub note_text: Option<String>,
}

impl NoteInput {
    /// `note_body` wins over `note_text`, which wins over `body`.
    pub fn normalized_body(&self) -> Option<&str> {
        non_empty(&self.note_body)
            .or_else(|| non_empty(&self.note_text))
            .or_else(|| non_empty(&self.body))
    }
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<String>,
    Json(input): Json<NoteInput>,
) -> Result<(StatusCode, Json<NoteRow>), ApiError> {
    let contact_id = parse_id(&contact_id).ok_or(ApiError::BadRequest("Invalid contact id"))?;

    let body = input
        .normalized_body()
        .ok_or(ApiError::BadRequest("Note content (body) is required."))?;

    let note = notes::insert_note(&state.db, contact_id, body).await;
    tracing::info!(note_id = note.id, contact_id, "note created");

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list_notes_for_contact(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<String>,
) -> Json<Vec<NoteRow>> {
    match parse_id(&contact_id) {
        Some(contact_id) => Json(notes::list_notes_by_contact(&state.db, contact_id).await),
        None => Json(Vec::new()),
    }
}

pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<NoteRow>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    notes::get_note_by_id(&state.db, id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<NoteInput>,
) -> Result<Json<NoteRow>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    notes::update_note(&state.db, id, input.normalized_body())
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    if notes::delete_note(&state.db, id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(NOT_FOUND))
    }
}
