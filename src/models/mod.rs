// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod flashcard;
pub mod user;

pub use flashcard::{Flashcard, FlashcardSet, FlashcardSetIndexEntry, SetDocument, SetQuery};
pub use user::UserRecord;
