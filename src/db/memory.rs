// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local document store with the same layout as Firestore.
//!
//! Used for local runs (`STORAGE_BACKEND=memory`) and tests. Each user's root
//! record and set documents sit under one map entry, so a save holds a single
//! entry lock while it touches both and commits them together.

use crate::models::{Flashcard, SetDocument, UserRecord};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct UserDocs {
    record: Option<UserRecord>,
    sets: HashMap<String, SetDocument>,
}

/// In-memory document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, UserDocs>>,
    unavailable: Arc<AtomicBool>,
    fail_set_deletes: Arc<AtomicBool>,
}

/// Raised by the store when a simulated fault is active.
#[derive(Debug, thiserror::Error)]
#[error("simulated storage fault: {0}")]
pub struct MemoryFault(&'static str);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every subsequent set-document delete fail, to exercise the
    /// partial-removal path.
    pub fn fail_set_deletes(&self, fail: bool) {
        self.fail_set_deletes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), MemoryFault> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MemoryFault("store unavailable"));
        }
        Ok(())
    }

    pub fn user_record(&self, user_id: &str) -> Result<Option<UserRecord>, MemoryFault> {
        self.check()?;
        Ok(self.users.get(user_id).and_then(|docs| docs.record.clone()))
    }

    pub fn set_document(
        &self,
        user_id: &str,
        doc_id: &str,
    ) -> Result<Option<SetDocument>, MemoryFault> {
        self.check()?;
        Ok(self
            .users
            .get(user_id)
            .and_then(|docs| docs.sets.get(doc_id).cloned()))
    }

    /// Write the index entry and the set document under one entry lock.
    pub fn commit_save(
        &self,
        user_id: &str,
        name: &str,
        doc_id: &str,
        flashcards: &[Flashcard],
    ) -> Result<(), MemoryFault> {
        self.check()?;
        let mut docs = self.users.entry(user_id.to_string()).or_default();
        docs.record.get_or_insert_with(UserRecord::default).insert(name);
        docs.sets.insert(
            doc_id.to_string(),
            SetDocument {
                flashcards: flashcards.to_vec(),
            },
        );
        Ok(())
    }

    /// Replace the root record, creating it if needed.
    pub fn put_user_record(&self, user_id: &str, record: UserRecord) -> Result<(), MemoryFault> {
        self.check()?;
        self.users.entry(user_id.to_string()).or_default().record = Some(record);
        Ok(())
    }

    /// Delete a set document. Deleting a missing document succeeds.
    pub fn delete_set_document(&self, user_id: &str, doc_id: &str) -> Result<(), MemoryFault> {
        self.check()?;
        if self.fail_set_deletes.load(Ordering::SeqCst) {
            return Err(MemoryFault("set document delete"));
        }
        if let Some(mut docs) = self.users.get_mut(user_id) {
            docs.sets.remove(doc_id);
        }
        Ok(())
    }
}
