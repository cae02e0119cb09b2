// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Comment writes.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Comment, User};
use crate::time_utils::now_rfc3339;

/// Comment append service. Any authenticated user may comment on any
/// task they can open.
#[derive(Clone)]
pub struct CommentService {
    db: FirestoreDb,
}

impl CommentService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Append a comment carrying the author's name and uid.
    ///
    /// Write failures map to [`AppError::CommentSend`] so the panel shows
    /// the send error rather than the load error.
    pub async fn add_comment(&self, author: &User, task_id: &str, text: &str) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest("Comment must not be empty".to_string()));
        }

        let comment = Comment {
            id: None,
            text: text.to_string(),
            author_name: author.name.clone(),
            author_id: author.uid.clone(),
            created_at: now_rfc3339(),
        };

        let stored = self
            .db
            .add_comment(task_id, &comment)
            .await
            .map_err(|e| AppError::CommentSend(e.to_string()))?;

        tracing::debug!(task = task_id, author = %author.uid, "Comment added");
        Ok(stored)
    }
}
