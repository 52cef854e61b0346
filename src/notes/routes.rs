use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::state::AppState;

use super::handlers::{self, Message};
use super::model::{CategoryFilter, CreateNote, FindNotesResponse, Note, UpdateNote, UserId};
use super::view::NoteView;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/notes", post(create_note))
        .route(
            "/api/v1/notes/{id}",
            get(find_notes).patch(update_note).delete(delete_note),
        )
        .route("/api/v1/notes/{id}/view", get(note_view))
        .with_state(state)
}

async fn create_note(
    State(state): State<AppState>,
    Json(args): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>)> {
    let note = handlers::create_note(state.store.as_ref(), args).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn find_notes(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<FindNotesResponse>> {
    handlers::find_notes(state.store.as_ref(), user_id)
        .await
        .map(Json)
}

async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Message>> {
    handlers::delete_note(state.store.as_ref(), note_id)
        .await
        .map(Json)
}

async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Json(args): Json<UpdateNote>,
) -> Result<Json<Message>> {
    handlers::update_note(state.store.as_ref(), note_id, args)
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    #[serde(default)]
    search: String,
    category: Option<String>,
}

async fn note_view(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<NoteView>> {
    let category = match query.category.as_deref() {
        None => CategoryFilter::All,
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::Validation(format!("unknown category: {raw}")))?,
    };
    handlers::note_view(state.store.as_ref(), user_id, query.search, category)
        .await
        .map(Json)
}
