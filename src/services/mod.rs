// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod flashcards;
pub mod generation;

pub use flashcards::FlashcardService;
pub use generation::GenerationClient;
