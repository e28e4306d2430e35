// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for a user's saved flashcard sets.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Flashcard, FlashcardSet, FlashcardSetIndexEntry, SetQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via session token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sets", get(list_sets).post(save_set))
        .route("/api/sets/{name}", get(get_set).delete(remove_set))
        .route("/api/flashcards", get(get_set_by_query))
}

// ─── Index ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetListResponse {
    pub sets: Vec<FlashcardSetIndexEntry>,
}

/// List the caller's saved sets.
async fn list_sets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SetListResponse>> {
    let sets = state.flashcards.list_sets(&user.user_id).await?;
    tracing::debug!(user_id = %user.user_id, count = sets.len(), "Listed flashcard sets");
    Ok(Json(SetListResponse { sets }))
}

// ─── Sets ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SaveSetRequest {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

/// Save (or replace) a named set.
async fn save_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SaveSetRequest>,
) -> Result<(StatusCode, Json<FlashcardSet>)> {
    let set = state
        .flashcards
        .save_set(&user.user_id, &body.name, &body.flashcards)
        .await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// Get one set by name.
async fn get_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<Json<FlashcardSet>> {
    let set = state.flashcards.open_set(&user.user_id, &name).await?;
    Ok(Json(set))
}

/// Get one set by `?id=<name>`, the form used by the set detail page.
async fn get_set_by_query(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SetQuery>,
) -> Result<Json<FlashcardSet>> {
    let name = params
        .set_name()
        .ok_or_else(|| AppError::Validation("Missing 'id' parameter".to_string()))?;

    let set = state.flashcards.open_set(&user.user_id, &name).await?;
    Ok(Json(set))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RemoveSetResponse {
    pub success: bool,
    /// Whether the name was in the index before the call
    pub removed: bool,
}

/// Remove a set from the index and delete its document.
async fn remove_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<Json<RemoveSetResponse>> {
    tracing::info!(user_id = %user.user_id, set_name = %name, "User-initiated set removal");

    let removed = state.flashcards.remove_set(&user.user_id, &name).await?;
    Ok(Json(RemoveSetResponse {
        success: true,
        removed,
    }))
}
