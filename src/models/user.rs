// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-user root record.

use super::FlashcardSetIndexEntry;
use serde::{Deserialize, Serialize};

/// Root record stored at `users/{user_id}`.
///
/// Holds the ordered index of saved set names. The user itself lives in the
/// identity provider; this record only exists once a set has been saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub flashcard_sets: Vec<FlashcardSetIndexEntry>,
}

impl UserRecord {
    pub fn contains(&self, name: &str) -> bool {
        self.flashcard_sets.iter().any(|entry| entry.name == name)
    }

    /// Append `name` unless it is already indexed. Returns whether it was added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.flashcard_sets.push(FlashcardSetIndexEntry {
            name: name.to_string(),
        });
        true
    }

    /// Drop every entry named exactly `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.flashcard_sets.len();
        self.flashcard_sets.retain(|entry| entry.name != name);
        self.flashcard_sets.len() != before
    }
}
