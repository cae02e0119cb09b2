// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure view derivation: (session, board, filters) → rendered partitions.
//!
//! Nothing here holds state. The board mirror hands in the task list
//! already sorted newest-first; derivation narrows it by the active
//! filters, applies the role-visibility rule, then partitions by status.

use crate::models::{Task, TaskStatus, User};

/// Active board filters. Empty fields impose no restriction.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title and description
    pub search: String,
    /// Exact-match assignee display name
    pub assignee: String,
}

impl TaskFilter {
    /// Whether `task` passes both filters (AND-composed).
    ///
    /// The assignee filter compares against the name resolved through the
    /// directory, so a renamed user's legacy tasks still match their
    /// current display name, the same name the board renders.
    pub fn matches(&self, task: &Task, users: &[User]) -> bool {
        if !self.assignee.is_empty() && display_assignee(task, users) != self.assignee {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}

/// Role-visibility rule.
///
/// A coordinator sees every task. A collaborator sees tasks assigned to
/// them plus anyone's completed work, but not other people's in-flight
/// tasks.
pub fn is_visible_to(viewer: &User, task: &Task) -> bool {
    viewer.is_coordinator()
        || task.is_assigned_to(&viewer.uid, &viewer.name)
        || task.status == TaskStatus::Completed
}

/// Status-partitioned board as rendered, with per-bucket counts taken
/// from the bucket lengths.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub pending: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub completed: Vec<Task>,
}

impl BoardView {
    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.bucket(status).len()
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.completed.len()
    }
}

/// Derive the rendered board for `viewer`.
///
/// Filters apply before the visibility rule, which applies before status
/// partitioning. Input order (newest-first) is preserved within buckets.
pub fn derive_board(
    viewer: &User,
    users: &[User],
    tasks: &[Task],
    filter: &TaskFilter,
) -> BoardView {
    let mut view = BoardView::default();
    for task in tasks {
        if !filter.matches(task, users) || !is_visible_to(viewer, task) {
            continue;
        }
        match task.status {
            TaskStatus::Pending => view.pending.push(task.clone()),
            TaskStatus::InProgress => view.in_progress.push(task.clone()),
            TaskStatus::Completed => view.completed.push(task.clone()),
        }
    }
    view
}

/// Resolve the assignee display name at render time.
///
/// Prefers the directory entry for the stored uid so renames show the
/// current name; falls back to the denormalized string for legacy tasks.
pub fn display_assignee<'a>(task: &'a Task, users: &'a [User]) -> &'a str {
    if let Some(uid) = &task.assignee_uid {
        if let Some(user) = users.iter().find(|u| &u.uid == uid) {
            return &user.name;
        }
    }
    &task.assigned_to
}
