// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Load-state machine, flip flags and lifetime guards shared by every page.

use crate::error::AppError;
use crate::models::{Flashcard, FlashcardSet};
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How a page should surface an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Next to the input that caused it.
    Inline,
    /// Page-level alert.
    Banner,
    /// Empty/informational state rather than an alert.
    Informational,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    pub code: &'static str,
    pub message: String,
    pub presentation: Presentation,
}

impl From<AppError> for ViewError {
    fn from(err: AppError) -> Self {
        let presentation = match &err {
            AppError::Validation(_) | AppError::Unauthorized => Presentation::Inline,
            AppError::SetNotFound(_) | AppError::StaleEntry(_) => Presentation::Informational,
            AppError::StorageUnavailable(_)
            | AppError::PartialRemoval(_)
            | AppError::GenerationFailed(_)
            | AppError::Internal(_) => Presentation::Banner,
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            presentation,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ViewError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn items(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Anything a page renders as a grid of flippable cards.
pub trait CardCollection {
    fn cards(&self) -> &[Flashcard];
}

impl CardCollection for Vec<Flashcard> {
    fn cards(&self) -> &[Flashcard] {
        self
    }
}

impl CardCollection for FlashcardSet {
    fn cards(&self) -> &[Flashcard] {
        &self.flashcards
    }
}

/// Per-card flip flags. Every card starts unflipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlipState {
    flipped: HashSet<usize>,
}

impl FlipState {
    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.contains(&index)
    }

    /// Flip one card and return its new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.flipped.remove(&index) {
            self.flipped.insert(index);
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.flipped.clear();
    }
}

/// The face of a card currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face<'a> {
    Front(&'a str),
    Back(&'a str),
}

/// Proof that a load was started. Completions with an outdated ticket are dropped.
#[derive(Debug)]
pub struct LoadTicket {
    epoch: u64,
}

/// State owned by one page for as long as it is mounted.
#[derive(Debug)]
pub struct Page<T> {
    state: ViewState<T>,
    flips: FlipState,
    notice: Option<ViewError>,
    epoch: u64,
    mounted: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            flips: FlipState::default(),
            notice: None,
            epoch: 0,
            mounted: true,
        }
    }
}

impl<T> Page<T> {
    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn flips(&self) -> &FlipState {
        &self.flips
    }

    /// Error from an action that did not replace the page content.
    pub fn notice(&self) -> Option<&ViewError> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Option<ViewError>) {
        if self.mounted {
            self.notice = notice;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enter `Loading`. Supersedes any load still in flight.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            return None;
        }
        self.epoch += 1;
        self.state = ViewState::Loading;
        self.notice = None;
        Some(LoadTicket { epoch: self.epoch })
    }

    /// Apply a load result. Returns false if the page moved on or was unmounted.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<T, AppError>) -> bool {
        if !self.mounted || ticket.epoch != self.epoch {
            return false;
        }
        self.state = match result {
            Ok(items) => {
                self.flips.reset();
                ViewState::Loaded(items)
            }
            Err(err) => ViewState::Failed(err.into()),
        };
        true
    }

    /// Mutate loaded content in place. No-op unless mounted and loaded.
    pub fn update_loaded(&mut self, f: impl FnOnce(&mut T)) -> bool {
        if !self.mounted {
            return false;
        }
        match &mut self.state {
            ViewState::Loaded(items) => {
                f(items);
                true
            }
            _ => false,
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch += 1;
    }
}

impl<T: CardCollection> Page<T> {
    /// Flip a loaded card. `None` if nothing is loaded or the index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let count = self.state.items()?.cards().len();
        if index >= count {
            return None;
        }
        Some(self.flips.toggle(index))
    }

    /// The visible face of a loaded card.
    pub fn face(&self, index: usize) -> Option<Face<'_>> {
        let card = self.state.items()?.cards().get(index)?;
        Some(if self.flips.is_flipped(index) {
            Face::Back(&card.back)
        } else {
            Face::Front(&card.front)
        })
    }
}

/// Shared handle to a page, cloned into every async action the page starts.
pub struct PageHandle<T> {
    inner: Arc<Mutex<Page<T>>>,
}

impl<T> Clone for PageHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for PageHandle<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Page::default())),
        }
    }
}

impl<T> PageHandle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the page. A panic elsewhere never leaves the page half-written,
    /// so a poisoned lock is still usable.
    pub fn lock(&self) -> MutexGuard<'_, Page<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a load: enter `Loading`, await `fut`, then apply its result if the
    /// page is still mounted and no newer load started meanwhile.
    pub async fn run<F>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let ticket = self.lock().begin();
        let Some(ticket) = ticket else {
            return false;
        };
        let result = fut.await;
        self.lock().finish(ticket, result)
    }

    /// Guard that unmounts the page when dropped.
    pub fn scope(&self) -> PageScope<T> {
        PageScope {
            page: self.clone(),
        }
    }
}

impl<T: Clone> PageHandle<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        self.lock().state().clone()
    }
}

/// Ties a page to the lifetime of the view that shows it.
pub struct PageScope<T> {
    page: PageHandle<T>,
}

impl<T> Drop for PageScope<T> {
    fn drop(&mut self) {
        self.page.lock().unmount();
    }
}
