// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Comment thread mirror.
//!
//! Lives only while a task's comment panel is open. Closing the panel or
//! switching tasks consumes the thread, so no subscription outlives its
//! panel and teardown runs exactly once per subscribe.

use tokio::sync::watch;

use crate::db::{CollectionMirror, FirestoreDb};
use crate::error::{AppError, Result};
use crate::models::Comment;

/// Live mirror of one task's comment sub-collection, oldest first.
pub struct CommentThread {
    task_id: String,
    mirror: CollectionMirror<Comment>,
}

impl CommentThread {
    /// Subscribe to `task_id`'s comments.
    ///
    /// Failures map to [`AppError::CommentLoad`] so the panel shows the
    /// load error ("could not load comments / check access rules").
    pub async fn open(db: &FirestoreDb, task_id: &str) -> Result<Self> {
        let mirror = db
            .watch_comments(task_id)
            .await
            .map_err(|e| AppError::CommentLoad(e.to_string()))?;
        tracing::debug!(task = task_id, "Comment panel opened");
        Ok(Self {
            task_id: task_id.to_string(),
            mirror,
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Current comments in non-decreasing creation-timestamp order.
    pub fn comments(&self) -> Vec<Comment> {
        self.mirror.snapshot()
    }

    /// Change notifications; each value is the full sorted thread.
    pub fn watch(&self) -> watch::Receiver<Vec<Comment>> {
        self.mirror.subscribe()
    }

    /// Close the panel, tearing the subscription down.
    pub async fn close(self) -> Result<()> {
        self.mirror.shutdown().await?;
        tracing::debug!(task = %self.task_id, "Comment panel closed");
        Ok(())
    }

    /// Switch the panel to another task: the old subscription is torn
    /// down before the new one starts.
    pub async fn switch_to(self, db: &FirestoreDb, task_id: &str) -> Result<Self> {
        self.close().await?;
        Self::open(db, task_id).await
    }
}
