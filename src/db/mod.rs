//! Database layer (Firestore).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    /// Per-user root records holding the set index.
    pub const USERS: &str = "users";
    /// Subcollection of `users/{id}` holding one document per set.
    pub const FLASHCARD_SETS: &str = "flashcardSets";
}

/// Firestore document id for a set name.
///
/// Set names are free text. Document ids may not contain `/`, may not be `.`
/// or `..`, and may not match `__.*__`, so on top of percent-encoding every
/// `.` and `_` is escaped too. The mapping stays one-to-one because `%` itself
/// is always encoded.
pub fn set_document_id(name: &str) -> String {
    urlencoding::encode(name)
        .replace('.', "%2E")
        .replace('_', "%5F")
}
