// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flashcard and flashcard-set models for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single generated card. Both faces are required when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// One entry of a user's saved-set index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlashcardSetIndexEntry {
    pub name: String,
}

/// A named, ordered collection of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlashcardSet {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

/// Query string naming one set, as in `/api/flashcards?id=<name>` and the set
/// detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SetQuery {
    pub id: Option<String>,
}

impl SetQuery {
    /// The requested set name, if present and not blank.
    pub fn set_name(self) -> Option<String> {
        self.id.filter(|id| !id.trim().is_empty())
    }
}

/// Stored body of `users/{user_id}/flashcardSets/{set}`.
///
/// The set name is the document key, so only the cards are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDocument {
    pub flashcards: Vec<Flashcard>,
}

impl SetDocument {
    pub fn into_set(self, name: impl Into<String>) -> FlashcardSet {
        FlashcardSet {
            name: name.into(),
            flashcards: self.flashcards,
        }
    }
}
