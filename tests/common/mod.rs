// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{routing::post, Json, Router};
use flashcard_studio::config::Config;
use flashcard_studio::db::{FirestoreDb, MemoryStore};
use flashcard_studio::middleware::auth::create_session_token;
use flashcard_studio::routes::create_router;
use flashcard_studio::services::{FlashcardService, GenerationClient};
use flashcard_studio::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a session token as the identity provider would.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_session_token(user_id, signing_key).expect("Failed to create session token")
}

/// Serve `router` on an ephemeral local port and return the `/generate` URL.
#[allow(dead_code)]
pub async fn spawn_generator(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/generate", addr)
}

/// A generation endpoint that answers questions about the cell and nothing else.
#[allow(dead_code)]
pub fn cell_biology_generator() -> Router {
    Router::new().route(
        "/generate",
        post(|Json(body): Json<Value>| async move {
            let text = body["text"].as_str().unwrap_or_default();
            if text.contains("Mitochondria") {
                Json(json!([
                    {"front": "What is the powerhouse of the cell?", "back": "Mitochondria"}
                ]))
            } else {
                Json(json!([]))
            }
        }),
    )
}

/// Build a service over `db` that talks to `generation_url`.
#[allow(dead_code)]
pub fn test_service(db: FirestoreDb, generation_url: &str) -> FlashcardService {
    let config = Config::test_default();
    let generator = GenerationClient::new(generation_url, config.generation_timeout).unwrap();
    FlashcardService::new(db, generator)
}

/// Create a test app over an in-memory store.
/// Returns the router, the shared state and the store behind it.
#[allow(dead_code)]
pub fn create_test_app(generation_url: &str) -> (Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let db = FirestoreDb::new_in_memory(store.clone());
    let state = Arc::new(AppState {
        config: Config::test_default(),
        flashcards: test_service(db, generation_url),
    });

    (create_router(state.clone()), state, store)
}

/// Create a test app whose database is offline.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let flashcards = test_service(FirestoreDb::new_mock(), &config.generation_api_url);
    let state = Arc::new(AppState { config, flashcards });

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Connect to the Firestore emulator.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to emulator")
}
