//! Journal endpoints
//!
//! `POST /api/users/:user_id/journal` creates an entry,
//! `GET /api/users/:user_id/journal` lists them newest first.
//! The user id is issued by the external identity provider; this service
//! does not verify it.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::journal;
use crate::models::{JournalEntry, NewJournalEntry};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<JournalEntry>,
}

/// POST /api/users/:user_id/journal
///
/// **Request:** `{"planet": "Mars", "landscapeUrl"?: "...", "species"?: [...], "notes"?: "..."}`
/// **Response:** 201 `{"id": "<uuid>"}`
///
/// **Errors:**
/// - 400: blank planet, body that is not a JSON entry, or no JSON content type
/// - 500: database failure
pub async fn create_entry(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<NewJournalEntry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(entry) = payload.map_err(|rejection| {
        tracing::warn!(user_id = %user_id, "Rejected journal entry body: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;
    let saved = journal::add_entry(&state.db, &user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: saved.id })))
}

/// GET /api/users/:user_id/journal
pub async fn list_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<EntriesResponse>> {
    let entries = journal::list_entries(&state.db, &user_id).await?;
    Ok(Json(EntriesResponse { entries }))
}

/// Build journal routes
pub fn journal_routes() -> Router<AppState> {
    Router::new().route(
        "/api/users/:user_id/journal",
        get(list_entries).post(create_entry),
    )
}
