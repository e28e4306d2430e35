// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flashcard Studio: turn text into flashcards and keep them by name
//!
//! This crate provides the backend API for generating flashcards from
//! free-form text and saving, listing, opening and removing a user's named
//! flashcard sets, plus the page state shared by every view of them.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod view;

use config::Config;
use services::FlashcardService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub flashcards: FlashcardService,
}
