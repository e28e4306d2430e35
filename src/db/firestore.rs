// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Storage layout:
//! - `users/{user_id}`: root record with the ordered set index
//! - `users/{user_id}/flashcardSets/{set}`: one document per saved set
//!
//! Every call is a round trip; nothing is cached locally.

use crate::db::{collections, set_document_id, MemoryStore};
use crate::error::AppError;
use crate::models::{Flashcard, FlashcardSet, FlashcardSetIndexEntry, SetDocument, UserRecord};

// Attempts per save before a conflicting or failed commit is reported.
const MAX_SAVE_ATTEMPTS: u32 = 3;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(MemoryStore),
    Offline,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

fn unavailable(e: impl std::fmt::Display) -> AppError {
    AppError::StorageUnavailable(e.to_string())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| unavailable(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| unavailable(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a client backed by a process-local store.
    pub fn new_in_memory(store: MemoryStore) -> Self {
        Self {
            backend: Backend::Memory(store),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return `StorageUnavailable`.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    // ─── Index Operations ────────────────────────────────────────

    /// Read the user's root record, `None` if it was never created.
    async fn get_user_record(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(user_id)
                .await
                .map_err(unavailable),
            Backend::Memory(store) => store.user_record(user_id).map_err(unavailable),
            Backend::Offline => Err(offline()),
        }
    }

    /// List the names of the user's saved sets, in save order.
    ///
    /// A user with no root record has no sets; that is not an error.
    pub async fn list_sets(&self, user_id: &str) -> Result<Vec<FlashcardSetIndexEntry>, AppError> {
        let record = self.get_user_record(user_id).await?;
        Ok(record.map(|r| r.flashcard_sets).unwrap_or_default())
    }

    // ─── Set Operations ──────────────────────────────────────────

    /// Load a saved set by name.
    pub async fn load_set(&self, user_id: &str, name: &str) -> Result<FlashcardSet, AppError> {
        let doc_id = set_document_id(name);

        let doc: Option<SetDocument> = match &self.backend {
            Backend::Firestore(client) => {
                let parent_path = client
                    .parent_path(collections::USERS, user_id)
                    .map_err(unavailable)?;
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::FLASHCARD_SETS)
                    .parent(&parent_path)
                    .obj()
                    .one(&doc_id)
                    .await
                    .map_err(unavailable)?
            }
            Backend::Memory(store) => store.set_document(user_id, &doc_id).map_err(unavailable)?,
            Backend::Offline => return Err(offline()),
        };

        doc.map(|d| d.into_set(name))
            .ok_or_else(|| AppError::SetNotFound(name.to_string()))
    }

    /// Atomically save a set: add it to the index (once) and write its document.
    ///
    /// Both writes commit together or not at all. Concurrent saves of
    /// different names all keep their index entries; concurrent saves of the
    /// same name leave the last committed cards.
    pub async fn save_set(
        &self,
        user_id: &str,
        name: &str,
        flashcards: &[Flashcard],
    ) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "Flashcard set name must not be empty".to_string(),
            ));
        }
        if flashcards.is_empty() {
            return Err(AppError::Validation(
                "Cannot save a flashcard set with no cards".to_string(),
            ));
        }

        let doc_id = set_document_id(name);

        match &self.backend {
            Backend::Firestore(client) => {
                let set_doc = SetDocument {
                    flashcards: flashcards.to_vec(),
                };
                let mut attempt = 1;
                loop {
                    let result =
                        Self::save_set_transaction(client, user_id, name, &doc_id, &set_doc).await;
                    match result {
                        Ok(()) => break,
                        Err(e) if attempt < MAX_SAVE_ATTEMPTS => {
                            tracing::warn!(
                                user_id,
                                set_name = name,
                                attempt,
                                error = %e,
                                "Set save transaction failed, retrying"
                            );
                            attempt += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            Backend::Memory(store) => store
                .commit_save(user_id, name, &doc_id, flashcards)
                .map_err(unavailable)?,
            Backend::Offline => return Err(offline()),
        }

        tracing::info!(
            user_id,
            set_name = name,
            card_count = flashcards.len(),
            "Flashcard set saved"
        );

        Ok(())
    }

    /// One attempt at a save: read the index and write both documents in a
    /// single transaction.
    ///
    /// The index read is bound to the transaction, so a concurrent save that
    /// changes the index makes this commit fail instead of dropping its entry.
    async fn save_set_transaction(
        client: &firestore::FirestoreDb,
        user_id: &str,
        name: &str,
        doc_id: &str,
        set_doc: &SetDocument,
    ) -> Result<(), AppError> {
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| unavailable(format!("Failed to begin transaction: {}", e)))?;

        // 1. Read the index within the transaction
        let tx_client = client.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );
        let record: Option<UserRecord> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| unavailable(format!("Failed to read index in transaction: {}", e)))?;

        let mut record = record.unwrap_or_default();
        let newly_indexed = record.insert(name);

        // 2. Index entry (creates the root record if absent)
        if newly_indexed {
            client
                .fluent()
                .update()
                .in_col(collections::USERS)
                .document_id(user_id)
                .object(&record)
                .add_to_transaction(&mut transaction)
                .map_err(|e| unavailable(format!("Failed to add index to transaction: {}", e)))?;
        }

        // 3. Full set document, replacing any prior content
        let parent_path = client
            .parent_path(collections::USERS, user_id)
            .map_err(unavailable)?;
        client
            .fluent()
            .update()
            .in_col(collections::FLASHCARD_SETS)
            .document_id(doc_id)
            .parent(&parent_path)
            .object(set_doc)
            .add_to_transaction(&mut transaction)
            .map_err(|e| unavailable(format!("Failed to add set to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| unavailable(format!("Transaction commit failed: {}", e)))?;
        Ok(())
    }

    /// Remove a set: drop its index entry, then delete its document.
    ///
    /// Returns whether the name was in the index. If the index update lands
    /// but the document delete fails, returns `PartialRemoval`; the entry is
    /// gone at that point and only the document is left behind.
    pub async fn remove_set(&self, user_id: &str, name: &str) -> Result<bool, AppError> {
        // Step 1: index
        let mut removed = false;
        if let Some(mut record) = self.get_user_record(user_id).await? {
            if record.remove(name) {
                self.put_user_record(user_id, &record).await?;
                removed = true;
            }
        }

        // Step 2: document (best effort; also sweeps documents orphaned by an
        // earlier failure)
        if let Err(e) = self.delete_set_document(user_id, name).await {
            if !removed {
                return Err(e);
            }
            tracing::warn!(
                user_id,
                set_name = name,
                error = %e,
                "Index entry removed but set document delete failed"
            );
            return Err(AppError::PartialRemoval(name.to_string()));
        }

        tracing::info!(user_id, set_name = name, removed, "Flashcard set removed");
        Ok(removed)
    }

    // ─── Helper Methods ────────────────────────────────────────────

    async fn put_user_record(&self, user_id: &str, record: &UserRecord) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(user_id)
                    .object(record)
                    .execute()
                    .await
                    .map_err(unavailable)?;
                Ok(())
            }
            Backend::Memory(store) => store
                .put_user_record(user_id, record.clone())
                .map_err(unavailable),
            Backend::Offline => Err(offline()),
        }
    }

    async fn delete_set_document(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        let doc_id = set_document_id(name);

        match &self.backend {
            Backend::Firestore(client) => {
                let parent_path = client
                    .parent_path(collections::USERS, user_id)
                    .map_err(unavailable)?;
                client
                    .fluent()
                    .delete()
                    .from(collections::FLASHCARD_SETS)
                    .document_id(&doc_id)
                    .parent(&parent_path)
                    .execute()
                    .await
                    .map_err(unavailable)?;
                Ok(())
            }
            Backend::Memory(store) => store
                .delete_set_document(user_id, &doc_id)
                .map_err(unavailable),
            Backend::Offline => Err(offline()),
        }
    }
}

fn offline() -> AppError {
    AppError::StorageUnavailable("Database not connected (offline mode)".to_string())
}
