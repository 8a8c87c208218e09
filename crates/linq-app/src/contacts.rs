use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use linq_store::queries::contacts::{self, ContactPatch, ContactRow};

use crate::error::ApiError;
use crate::state::AppState;

const NOT_FOUND: &str = "Contact not found";

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Path ids are unsigned integers; anything else matches no record.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Empty strings count as "not provided".
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<ContactRow>), ApiError> {
    let (Some(name), Some(email)) = (non_empty(&input.name), non_empty(&input.email)) else {
        return Err(ApiError::BadRequest("Name and Email are required"));
    };

    let contact = contacts::insert_contact(&state.db, name, email).await;
    tracing::info!(contact_id = contact.id, "contact created");

    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn list_contacts(State(state): State<Arc<AppState>>) -> Json<Vec<ContactRow>> {
    Json(contacts::list_contacts(&state.db).await)
}

pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ContactRow>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    contacts::get_contact_by_id(&state.db, id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<ContactInput>,
) -> Result<Json<ContactRow>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    let patch = ContactPatch {
        name: non_empty(&input.name),
        email: non_empty(&input.email),
    };

    contacts::update_contact(&state.db, id, patch)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound(NOT_FOUND))?;

    if contacts::delete_contact(&state.db, id).await {
        tracing::info!(contact_id = id, "contact deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(NOT_FOUND))
    }
}
