// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard workflows shared by the HTTP routes and page controllers.
//!
//! Handles:
//! - Listing, opening, saving and removing a user's sets
//! - Detecting index entries whose set document is gone
//! - Generating cards from text

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Flashcard, FlashcardSet, FlashcardSetIndexEntry};
use crate::services::GenerationClient;

/// High-level flashcard service.
#[derive(Clone)]
pub struct FlashcardService {
    db: FirestoreDb,
    generator: GenerationClient,
}

impl FlashcardService {
    pub fn new(db: FirestoreDb, generator: GenerationClient) -> Self {
        Self { db, generator }
    }

    pub async fn list_sets(&self, user_id: &str) -> Result<Vec<FlashcardSetIndexEntry>, AppError> {
        self.db.list_sets(user_id).await
    }

    /// Load a set for display.
    ///
    /// A missing document whose name is still in the index is reported as
    /// `StaleEntry` rather than `SetNotFound`.
    pub async fn open_set(&self, user_id: &str, name: &str) -> Result<FlashcardSet, AppError> {
        let name = name.trim();
        match self.db.load_set(user_id, name).await {
            Err(AppError::SetNotFound(missing)) => {
                let indexed = self
                    .db
                    .list_sets(user_id)
                    .await?
                    .iter()
                    .any(|entry| entry.name == missing);
                if indexed {
                    tracing::warn!(user_id, set_name = %missing, "Index entry has no set document");
                    Err(AppError::StaleEntry(missing))
                } else {
                    Err(AppError::SetNotFound(missing))
                }
            }
            other => other,
        }
    }

    /// Save cards under `name`, replacing any set already saved with that name.
    ///
    /// Surrounding whitespace is not part of a set name, here or in
    /// `open_set` and `remove_set`.
    pub async fn save_set(
        &self,
        user_id: &str,
        name: &str,
        flashcards: &[Flashcard],
    ) -> Result<FlashcardSet, AppError> {
        let name = name.trim();
        self.db.save_set(user_id, name, flashcards).await?;
        Ok(FlashcardSet {
            name: name.to_string(),
            flashcards: flashcards.to_vec(),
        })
    }

    pub async fn remove_set(&self, user_id: &str, name: &str) -> Result<bool, AppError> {
        self.db.remove_set(user_id, name.trim()).await
    }

    pub async fn generate(&self, text: &str) -> Result<Vec<Flashcard>, AppError> {
        self.generator.generate(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::UserRecord;
    use std::time::Duration;

    fn service() -> (FlashcardService, MemoryStore) {
        let store = MemoryStore::new();
        let generator =
            GenerationClient::new("http://127.0.0.1:9/generate", Duration::from_secs(1)).unwrap();
        (
            FlashcardService::new(FirestoreDb::new_in_memory(store.clone()), generator),
            store,
        )
    }

    #[tokio::test]
    async fn test_open_set_reports_stale_entry() {
        let (service, store) = service();
        let mut record = UserRecord::default();
        record.insert("Orphan");
        store.put_user_record("u1", record).unwrap();

        let err = service.open_set("u1", "Orphan").await.unwrap_err();
        assert!(matches!(err, AppError::StaleEntry(ref name) if name == "Orphan"));
    }

    #[tokio::test]
    async fn test_open_set_unknown_name_is_not_found() {
        let (service, _) = service();
        let err = service.open_set("u1", "Nope").await.unwrap_err();
        assert!(matches!(err, AppError::SetNotFound(_)));
    }

    #[tokio::test]
    async fn test_save_trims_name() {
        let (service, _) = service();
        let saved = service
            .save_set("u1", "  Bio1 ", &[Flashcard::new("Q", "A")])
            .await
            .unwrap();
        assert_eq!(saved.name, "Bio1");

        let names: Vec<_> = service
            .list_sets("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Bio1"]);
    }

    #[tokio::test]
    async fn test_open_and_remove_ignore_surrounding_whitespace() {
        let (service, _) = service();
        service
            .save_set("u1", " Bio1 ", &[Flashcard::new("Q", "A")])
            .await
            .unwrap();

        let set = service.open_set("u1", " Bio1 ").await.unwrap();
        assert_eq!(set.name, "Bio1");

        assert!(service.remove_set("u1", "\tBio1 ").await.unwrap());
        assert!(service.list_sets("u1").await.unwrap().is_empty());
    }
}
