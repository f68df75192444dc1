//! Request handlers
//!
//! Path ids are taken as raw strings and parsed here, so a non-numeric
//! segment behaves like an unknown id instead of failing extraction.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use phonebook_core::{Entry, EntryId, NewEntry};

use crate::error::ApiError;
use crate::state::AppState;

fn parse_id(raw: &str) -> Option<EntryId> {
    raw.parse().ok()
}

/// GET / - Static welcome page
pub async fn welcome() -> Html<&'static str> {
    Html("<h1>Welcome to the Phonebook!</h1>")
}

/// GET /info - Entry count and the current server time
pub async fn info(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let count = state.store().count().await?;
    let now = chrono::Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");

    Ok(Html(format!(
        "<p>Phonebook has info for {} people</p>\n<p>{}</p>",
        count, now
    )))
}

/// GET /api/persons - All entries in insertion order
pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.store().list_all().await?))
}

/// GET /api/persons/{id} - One entry
///
/// - `200 OK` with the entry
/// - `404 Not Found` if the id is unknown or not a number
pub async fn get_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(ApiError::person_not_found)?;

    state
        .store()
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::person_not_found)
}

/// POST /api/persons - Create an entry
///
/// - `200 OK` with the created entry
/// - `400 Bad Request` if name or number is missing, the name is taken, or
///   the body is not JSON
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Json(new_entry) = payload?;
    Ok(Json(state.store().create(new_entry).await?))
}

/// PUT /api/persons/{id} - Replace the number of an entry
///
/// The `name` in the body is ignored; id and name of the stored entry are
/// kept.
///
/// - `200 OK` with the updated entry
/// - `400 Bad Request` if number is missing or the body is not JSON
/// - `404 Not Found` if the id is unknown or not a number
pub async fn update_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(ApiError::person_not_found)?;
    let Json(body) = payload?;

    Ok(Json(state.store().replace(id, &body.number).await?))
}

/// DELETE /api/persons/{id} - Remove an entry
///
/// Always `204 No Content`, whether or not the id existed.
pub async fn delete_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Some(id) = parse_id(&raw_id) {
        state.store().remove(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown paths
pub async fn unknown_endpoint() -> ApiError {
    ApiError::not_found("unknown endpoint")
}
