// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Comment model for the per-task `comments` sub-collection.

use serde::{Deserialize, Serialize};

/// A comment on a task.
///
/// Comments are append-only: the client never edits or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Firestore document ID (populated on read, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub text: String,
    /// Display name of the author at the time of writing
    pub author_name: String,
    /// Identity-provider uid of the author
    pub author_id: String,
    /// Creation timestamp (RFC3339 UTC)
    pub created_at: String,
}
