// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;
pub mod listener;

pub use firestore::FirestoreDb;
pub use listener::CollectionMirror;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TASKS: &str = "tasks";
    /// Sub-collection under each task document
    pub const COMMENTS: &str = "comments";
}
