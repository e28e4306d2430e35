// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard generation route.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::Flashcard;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate", post(generate))
}

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GenerateRequest {
    pub text: String,
}

/// Generate flashcards from free-form text.
///
/// Responds with the bare array of `{front, back}` pairs.
async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Vec<Flashcard>>> {
    let flashcards = state.flashcards.generate(&body.text).await?;
    tracing::info!(
        user_id = %user.user_id,
        card_count = flashcards.len(),
        "Generated flashcards"
    );
    Ok(Json(flashcards))
}
