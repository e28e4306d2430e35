// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page-side state: load states, flip flags and page controllers.

pub mod pages;
pub mod state;

pub use pages::{set_name_from_query, GeneratePage, Identity, SetDetailPage, SetListPage};
pub use state::{
    CardCollection, Face, FlipState, LoadTicket, Page, PageHandle, PageScope, Presentation,
    ViewError, ViewState,
};
