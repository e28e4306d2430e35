// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page controllers: set list, set detail and generation.
//!
//! Every page follows the same rules:
//! - nothing touches storage until the identity is loaded and signed in
//! - each load goes through a `PageHandle`, so completions that arrive after
//!   the page was left or superseded are dropped
//! - loading a new collection resets every flip flag

use crate::error::AppError;
use crate::models::{Flashcard, FlashcardSet, FlashcardSetIndexEntry, SetQuery};
use crate::services::FlashcardService;
use crate::view::state::{Face, PageHandle, ViewError, ViewState};
use axum::extract::Query;
use axum::http::Uri;

/// Identity as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub is_signed_in: bool,
    pub is_loaded: bool,
}

impl Identity {
    pub fn signed_in(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_signed_in: true,
            is_loaded: true,
        }
    }

    /// The user id, once it is safe to read storage on the user's behalf.
    pub fn user_id(&self) -> Option<&str> {
        (self.is_loaded && self.is_signed_in).then_some(self.id.as_str())
    }
}

/// Read the set name from a page query string such as `?id=Bio%201`.
pub fn set_name_from_query(query: &str) -> Option<String> {
    let uri: Uri = format!("/?{}", query.trim_start_matches('?')).parse().ok()?;
    let Query(params) = Query::<SetQuery>::try_from_uri(&uri).ok()?;
    params.set_name()
}

// ─── Set List ────────────────────────────────────────────────

/// Lists the user's saved sets.
pub struct SetListPage {
    service: FlashcardService,
    identity: Identity,
    page: PageHandle<Vec<FlashcardSetIndexEntry>>,
}

impl SetListPage {
    pub fn new(service: FlashcardService, identity: Identity) -> Self {
        Self {
            service,
            identity,
            page: PageHandle::new(),
        }
    }

    pub fn handle(&self) -> &PageHandle<Vec<FlashcardSetIndexEntry>> {
        &self.page
    }

    pub fn state(&self) -> ViewState<Vec<FlashcardSetIndexEntry>> {
        self.page.snapshot()
    }

    pub fn notice(&self) -> Option<ViewError> {
        self.page.lock().notice().cloned()
    }

    /// Fetch the index. Stays `Idle` until the identity is ready.
    pub async fn load(&self) -> bool {
        let Some(user_id) = self.identity.user_id() else {
            return false;
        };
        self.page.run(self.service.list_sets(user_id)).await
    }

    /// Remove a set. The visible list changes only once the store confirms
    /// the index entry is gone.
    ///
    /// A list load still in flight may predate the removal, so it is
    /// superseded by a fresh load instead of being allowed to land.
    pub async fn remove(&self, name: &str) -> Result<(), ViewError> {
        let user_id = self
            .identity
            .user_id()
            .ok_or_else(|| ViewError::from(AppError::Unauthorized))?;
        let name = name.trim();

        let result = self.service.remove_set(user_id, name).await;

        // The index entry is already gone on a partial removal.
        let index_changed = matches!(result, Ok(_) | Err(AppError::PartialRemoval(_)));
        let notice = result.err().map(ViewError::from);

        let reload = {
            let mut page = self.page.lock();
            page.set_notice(notice.clone());
            if index_changed && page.state().is_loading() {
                true
            } else {
                if index_changed {
                    page.update_loaded(|entries| entries.retain(|e| e.name != name));
                }
                false
            }
        };

        if reload {
            self.load().await;
            // A fresh load clears the notice; keep the removal's outcome visible.
            self.page.lock().set_notice(notice.clone());
        }

        match notice {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ─── Set Detail ──────────────────────────────────────────────

/// Shows one saved set with flippable cards.
pub struct SetDetailPage {
    service: FlashcardService,
    identity: Identity,
    requested: Option<String>,
    page: PageHandle<FlashcardSet>,
}

impl SetDetailPage {
    /// Build the page for a query string carrying `id=<set name>`.
    pub fn from_query(service: FlashcardService, identity: Identity, query: &str) -> Self {
        Self {
            service,
            identity,
            requested: set_name_from_query(query),
            page: PageHandle::new(),
        }
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn handle(&self) -> &PageHandle<FlashcardSet> {
        &self.page
    }

    pub fn state(&self) -> ViewState<FlashcardSet> {
        self.page.snapshot()
    }

    /// Load the set named in the query. Stays `Idle` without identity or `id`.
    pub async fn load(&self) -> bool {
        match self.requested.as_deref() {
            Some(name) => self.open(name).await,
            None => false,
        }
    }

    /// Switch to another set.
    pub async fn open(&self, name: &str) -> bool {
        let Some(user_id) = self.identity.user_id() else {
            return false;
        };
        self.page.run(self.service.open_set(user_id, name)).await
    }

    pub fn toggle(&self, index: usize) -> Option<bool> {
        self.page.lock().toggle(index)
    }

    pub fn face(&self, index: usize) -> Option<String> {
        self.page.lock().face(index).map(face_text)
    }

    pub fn is_flipped(&self, index: usize) -> bool {
        self.page.lock().flips().is_flipped(index)
    }
}

// ─── Generate ────────────────────────────────────────────────

/// Turns input text into cards and saves them as a named set.
pub struct GeneratePage {
    service: FlashcardService,
    identity: Identity,
    text: String,
    page: PageHandle<Vec<Flashcard>>,
}

impl GeneratePage {
    pub fn new(service: FlashcardService, identity: Identity) -> Self {
        Self {
            service,
            identity,
            text: String::new(),
            page: PageHandle::new(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current input. Kept across failures so the user can resubmit.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&self) -> &PageHandle<Vec<Flashcard>> {
        &self.page
    }

    pub fn state(&self) -> ViewState<Vec<Flashcard>> {
        self.page.snapshot()
    }

    pub fn notice(&self) -> Option<ViewError> {
        self.page.lock().notice().cloned()
    }

    /// Generate cards from the current text.
    ///
    /// Blank input is reported inline and leaves any earlier result on screen.
    pub async fn submit(&self) -> bool {
        if self.text.trim().is_empty() {
            self.page.lock().set_notice(Some(ViewError::from(AppError::Validation(
                "Enter some text to generate flashcards from".to_string(),
            ))));
            return false;
        }
        self.page.run(self.service.generate(&self.text)).await
    }

    /// Save the generated cards under `name`.
    pub async fn save(&self, name: &str) -> Result<FlashcardSet, ViewError> {
        let user_id = self
            .identity
            .user_id()
            .ok_or_else(|| ViewError::from(AppError::Unauthorized))?;
        let cards = self.page.snapshot().items().cloned().unwrap_or_default();

        let result = self.service.save_set(user_id, name, &cards).await;

        let mut page = self.page.lock();
        match result {
            Ok(set) => {
                page.set_notice(None);
                Ok(set)
            }
            Err(err) => {
                let err = ViewError::from(err);
                page.set_notice(Some(err.clone()));
                Err(err)
            }
        }
    }

    pub fn toggle(&self, index: usize) -> Option<bool> {
        self.page.lock().toggle(index)
    }

    pub fn face(&self, index: usize) -> Option<String> {
        self.page.lock().face(index).map(face_text)
    }
}

fn face_text(face: Face<'_>) -> String {
    match face {
        Face::Front(text) | Face::Back(text) => text.to_string(),
    }
}
