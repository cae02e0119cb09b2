// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task board mirror.
//!
//! Started once a session exists. Every remote change replaces the local
//! task list wholesale, sorted newest-first; the rendered partitions are
//! re-derived from the snapshot on demand. No failure here is fatal: a
//! failed subscription degrades to an empty board.

use tokio::sync::watch;

use crate::db::{CollectionMirror, FirestoreDb};
use crate::error::Result;
use crate::models::{Task, User};
use crate::view::{derive_board, BoardView, TaskFilter};

/// Live mirror of the full task collection.
pub struct TaskBoard {
    rx: watch::Receiver<Vec<Task>>,
    mirror: Option<CollectionMirror<Task>>,
    // Keeps the empty channel alive when the subscription failed and we
    // degraded to an empty board.
    _fallback_tx: Option<watch::Sender<Vec<Task>>>,
}

impl TaskBoard {
    /// Subscribe to the task collection.
    ///
    /// A subscription failure is logged and degrades to an empty board;
    /// it never fails activation. Each session change starts a fresh
    /// board, which retries the subscription.
    pub async fn start(db: &FirestoreDb) -> Self {
        match db.watch_tasks().await {
            Ok(mirror) => {
                let rx = mirror.subscribe();
                Self {
                    rx,
                    mirror: Some(mirror),
                    _fallback_tx: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Task board subscription failed, showing an empty board");
                let (tx, rx) = watch::channel(Vec::new());
                Self {
                    rx,
                    mirror: None,
                    _fallback_tx: Some(tx),
                }
            }
        }
    }

    /// Current task list, newest first.
    pub fn tasks(&self) -> Vec<Task> {
        self.rx.borrow().clone()
    }

    /// Change notifications; each value is the full sorted task list.
    pub fn watch(&self) -> watch::Receiver<Vec<Task>> {
        self.rx.clone()
    }

    /// The board as `viewer` sees it under the active filters, with
    /// assignee names resolved against `users`.
    pub fn view_for(&self, viewer: &User, users: &[User], filter: &TaskFilter) -> BoardView {
        derive_board(viewer, users, &self.tasks(), filter)
    }

    /// Tear down the subscription. Consumes the board, so teardown runs
    /// exactly once.
    pub async fn shutdown(self) -> Result<()> {
        match self.mirror {
            Some(mirror) => mirror.shutdown().await,
            None => Ok(()),
        }
    }
}
