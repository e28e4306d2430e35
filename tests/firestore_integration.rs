// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (`FIRESTORE_EMULATOR_HOST`). Each test uses its own user id.

use flashcard_studio::error::AppError;
use flashcard_studio::models::Flashcard;

mod common;
use common::test_db;

/// Generate a unique user id for test isolation.
fn unique_user_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-user-{}", nanos)
}

fn cards() -> Vec<Flashcard> {
    vec![
        Flashcard::new("What is the powerhouse of the cell?", "Mitochondria"),
        Flashcard::new("What carries genetic information?", "DNA"),
    ]
}

#[tokio::test]
async fn test_new_user_has_no_sets() {
    require_emulator!();

    let db = test_db().await;
    let sets = db.list_sets(&unique_user_id()).await.unwrap();
    assert!(sets.is_empty());
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.save_set(&user_id, "Bio1", &cards()).await.unwrap();

    let names: Vec<_> = db
        .list_sets(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Bio1"]);

    let set = db.load_set(&user_id, "Bio1").await.unwrap();
    assert_eq!(set.name, "Bio1");
    assert_eq!(set.flashcards, cards());
}

#[tokio::test]
async fn test_resave_keeps_single_index_entry() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.save_set(&user_id, "Bio1", &cards()).await.unwrap();
    db.save_set(&user_id, "Chem1", &cards()).await.unwrap();
    db.save_set(&user_id, "Bio1", &cards()[..1]).await.unwrap();

    let names: Vec<_> = db
        .list_sets(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Bio1", "Chem1"]);
    assert_eq!(
        db.load_set(&user_id, "Bio1").await.unwrap().flashcards,
        cards()[..1]
    );
}

#[tokio::test]
async fn test_name_with_slash() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.save_set(&user_id, "Cells/Week 3", &cards()).await.unwrap();
    let set = db.load_set(&user_id, "Cells/Week 3").await.unwrap();
    assert_eq!(set.name, "Cells/Week 3");
}

#[tokio::test]
async fn test_remove_set() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.save_set(&user_id, "Bio1", &cards()).await.unwrap();
    db.save_set(&user_id, "Chem1", &cards()).await.unwrap();

    assert!(db.remove_set(&user_id, "Bio1").await.unwrap());
    // Second removal finds nothing in the index.
    assert!(!db.remove_set(&user_id, "Bio1").await.unwrap());

    let names: Vec<_> = db
        .list_sets(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Chem1"]);

    let err = db.load_set(&user_id, "Bio1").await.unwrap_err();
    assert!(matches!(err, AppError::SetNotFound(_)));
}

#[tokio::test]
async fn test_concurrent_saves_keep_both_entries() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let (bio_cards, chem_cards) = (cards(), cards());
    let (first, second) = tokio::join!(
        db.save_set(&user_id, "Bio1", &bio_cards),
        db.save_set(&user_id, "Chem1", &chem_cards)
    );
    first.unwrap();
    second.unwrap();

    let mut names: Vec<_> = db
        .list_sets(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    names.sort();
    assert_eq!(names, ["Bio1", "Chem1"]);
}

#[tokio::test]
async fn test_reserved_names_are_valid_document_ids() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    for name in [".", "..", "__init__"] {
        db.save_set(&user_id, name, &cards()).await.unwrap();
        assert_eq!(db.load_set(&user_id, name).await.unwrap().name, name);
    }
}
