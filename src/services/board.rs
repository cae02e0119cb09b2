// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task board mutations.
//!
//! Every mutation is a single direct write checked against the permission
//! matrix first. There is no optimistic local patch: the task mirror is
//! the sole source of truth and catches up when the listen channel
//! delivers the write. Every failure propagates to the caller; nothing is
//! logged-and-swallowed.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Task, TaskPatch, TaskPriority, TaskStatus, User};
use crate::permissions::{self, TaskAction};
use crate::time_utils::now_rfc3339;

/// Input for task creation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Assignee display name (copied onto the task)
    pub assignee_name: String,
    /// Stable uid of the assignee, when known
    pub assignee_uid: Option<String>,
    pub priority: Option<TaskPriority>,
    /// Agreed delivery date, if any (RFC3339 UTC)
    pub delivery_date: Option<String>,
}

/// Task mutation service.
#[derive(Clone)]
pub struct BoardService {
    db: FirestoreDb,
}

impl BoardService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Create a task (coordinator-only). New tasks start Pending with the
    /// creation and assignment timestamps set now.
    pub async fn add_task(&self, actor: &User, new_task: NewTask) -> Result<Task> {
        if !actor.is_coordinator() {
            return Err(AppError::PermissionDenied("create tasks".to_string()));
        }
        if new_task.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title must not be empty".to_string()));
        }

        let now = now_rfc3339();
        let task = Task {
            id: None,
            title: new_task.title.trim().to_string(),
            description: new_task.description,
            assigned_to: new_task.assignee_name,
            assignee_uid: new_task.assignee_uid,
            status: TaskStatus::Pending,
            priority: new_task.priority,
            created_at: now.clone(),
            assignment_date: now,
            delivery_date: new_task.delivery_date,
            created_by: actor.name.clone(),
        };

        let stored = self.db.create_task(&task).await?;
        tracing::info!(
            task = stored.id.as_deref().unwrap_or("?"),
            assignee = %stored.assigned_to,
            "Task created"
        );
        Ok(stored)
    }

    /// Apply a field-level patch to a task.
    ///
    /// The current document is read first so the permission matrix is
    /// evaluated against the task as stored, then only the touched fields
    /// are written.
    pub async fn update_task(&self, actor: &User, task_id: &str, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("Empty task patch".to_string()));
        }

        let mut task = self
            .db
            .get_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task {}", task_id)))?;

        permissions::check_patch(actor, &task, &patch)?;

        let mut fields: Vec<&str> = Vec::new();
        if let Some(title) = patch.title {
            task.title = title;
            fields.push("title");
        }
        if let Some(description) = patch.description {
            task.description = description;
            fields.push("description");
        }
        if let Some(status) = patch.status {
            task.status = status;
            fields.push("status");
        }
        if let Some(priority) = patch.priority {
            task.priority = Some(priority);
            fields.push("priority");
        }
        if let Some(delivery_date) = patch.delivery_date {
            task.delivery_date = delivery_date;
            fields.push("deliveryDate");
        }
        if let Some((name, uid)) = patch.assignee {
            task.assigned_to = name;
            task.assignee_uid = Some(uid);
            task.assignment_date = now_rfc3339();
            fields.push("assignedTo");
            fields.push("assigneeUid");
            fields.push("assignmentDate");
        }

        self.db.update_task_fields(task_id, &task, &fields).await?;
        tracing::info!(task = task_id, ?fields, "Task updated");
        Ok(task)
    }

    /// Convenience wrapper for the most common mutation.
    pub async fn set_status(&self, actor: &User, task_id: &str, status: TaskStatus) -> Result<Task> {
        self.update_task(actor, task_id, TaskPatch::status(status))
            .await
    }

    /// Delete a task (coordinator-only).
    pub async fn delete_task(&self, actor: &User, task_id: &str) -> Result<()> {
        let task = self
            .db
            .get_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task {}", task_id)))?;

        permissions::check(actor, &task, TaskAction::Delete)?;

        self.db.delete_task(task_id).await?;
        tracing::info!(task = task_id, "Task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn collaborator() -> User {
        User {
            uid: "uid-ana".to_string(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role: Role::Collaborator,
        }
    }

    #[tokio::test]
    async fn test_collaborator_cannot_create_tasks() {
        let svc = BoardService::new(FirestoreDb::new_mock());
        let err = svc
            .add_task(
                &collaborator(),
                NewTask {
                    title: "T".to_string(),
                    description: String::new(),
                    assignee_name: "Ana".to_string(),
                    assignee_uid: Some("uid-ana".to_string()),
                    priority: None,
                    delivery_date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_empty_patch_is_rejected() {
        let svc = BoardService::new(FirestoreDb::new_mock());
        let err = svc
            .update_task(&collaborator(), "task-1", TaskPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
