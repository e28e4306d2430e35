// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard Studio API Server
//!
//! Generates flashcards from text and stores each user's named sets in
//! Firestore.

use flashcard_studio::{
    config::{Config, StorageBackend},
    db::{FirestoreDb, MemoryStore},
    services::{FlashcardService, GenerationClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Flashcard Studio API");

    // Initialize storage
    let db = match config.storage_backend {
        StorageBackend::Firestore => FirestoreDb::new(&config.gcp_project_id).await?,
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; saved sets are lost on restart");
            FirestoreDb::new_in_memory(MemoryStore::new())
        }
    };

    // Initialize generation client
    let generator = GenerationClient::new(&config.generation_api_url, config.generation_timeout)?;
    tracing::info!(
        endpoint = %config.generation_api_url,
        timeout_secs = config.generation_timeout.as_secs(),
        "Generation client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        flashcards: FlashcardService::new(db, generator),
    });

    // Build router
    let app = flashcard_studio::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashcard_studio=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
