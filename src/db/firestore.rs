// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (the directory collection)
//! - Tasks (the board collection)
//! - Comments (per-task sub-collection)
//!
//! plus live mirrors ([`CollectionMirror`]) for each of them.

use std::cmp::Ordering;

use crate::db::{collections, CollectionMirror};
use crate::error::AppError;
use crate::models::{Comment, Role, Task, User};

/// Listen target IDs, one per mirrored collection.
const USERS_TARGET: firestore::FirestoreListenerTarget = firestore::FirestoreListenerTarget::new(1);
const TASKS_TARGET: firestore::FirestoreListenerTarget = firestore::FirestoreListenerTarget::new(2);
const COMMENTS_TARGET: firestore::FirestoreListenerTarget =
    firestore::FirestoreListenerTarget::new(3);

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a directory record by identity-provider uid.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One-shot read of the full directory.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a directory record, keyed by uid.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Update only the role field of a directory record.
    pub async fn set_user_role(&self, uid: &str, role: Role) -> Result<(), AppError> {
        let mut user = self
            .get_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", uid)))?;
        user.role = role;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(["role"])
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Live mirror of the directory, sorted by display name.
    pub async fn watch_users(&self) -> Result<CollectionMirror<User>, AppError> {
        CollectionMirror::start(
            self.get_client()?,
            collections::USERS,
            None,
            USERS_TARGET,
            |a: &User, b: &User| a.name.cmp(&b.name).then_with(|| a.uid.cmp(&b.uid)),
        )
        .await
    }

    // ─── Task Operations ─────────────────────────────────────────

    /// Get a task by document ID.
    pub async fn get_task(&self, task_id: &str) -> Result<Option<Task>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TASKS)
            .obj()
            .one(task_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// One-shot read of the full task collection, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let mut tasks: Vec<Task> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TASKS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tasks.sort_by(task_order);
        Ok(tasks)
    }

    /// Create a task with a generated document ID. Returns the stored task,
    /// id populated.
    pub async fn create_task(&self, task: &Task) -> Result<Task, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::TASKS)
            .generate_document_id()
            .object(task)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Field-level task patch: writes only the listed wire-format fields
    /// from `task`.
    pub async fn update_task_fields(
        &self,
        task_id: &str,
        task: &Task,
        fields: &[&str],
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields.iter().copied())
            .in_col(collections::TASKS)
            .document_id(task_id)
            .object(task)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a task document.
    ///
    /// Comment sub-collections are left behind by Firestore semantics;
    /// they are unreachable once the parent is gone.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TASKS)
            .document_id(task_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Live mirror of the task collection, newest first.
    pub async fn watch_tasks(&self) -> Result<CollectionMirror<Task>, AppError> {
        CollectionMirror::start(
            self.get_client()?,
            collections::TASKS,
            None,
            TASKS_TARGET,
            task_order,
        )
        .await
    }

    // ─── Comment Operations ──────────────────────────────────────

    /// One-shot read of a task's comments, oldest first.
    pub async fn list_comments(&self, task_id: &str) -> Result<Vec<Comment>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::TASKS, task_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut comments: Vec<Comment> = client
            .fluent()
            .select()
            .from(collections::COMMENTS)
            .parent(parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        comments.sort_by(comment_order);
        Ok(comments)
    }

    /// Append a comment to a task. Returns the stored comment, id populated.
    pub async fn add_comment(&self, task_id: &str, comment: &Comment) -> Result<Comment, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::TASKS, task_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .insert()
            .into(collections::COMMENTS)
            .generate_document_id()
            .parent(parent_path)
            .object(comment)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Live mirror of one task's comment sub-collection, oldest first.
    pub async fn watch_comments(&self, task_id: &str) -> Result<CollectionMirror<Comment>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::TASKS, task_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        CollectionMirror::start(
            client,
            collections::COMMENTS,
            Some(parent_path),
            COMMENTS_TARGET,
            comment_order,
        )
        .await
    }
}

/// Board order: creation timestamp descending (newest first), document ID
/// as tie-breaker for a stable sort.
fn task_order(a: &Task, b: &Task) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Thread order: creation timestamp ascending, document ID as tie-breaker.
fn comment_order(a: &Comment, b: &Comment) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_at(id: &str, created_at: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "_firestore_id": id,
            "title": "t",
            "description": "",
            "assignedTo": "Ana",
            "status": "pending",
            "createdAt": created_at,
            "assignmentDate": created_at,
            "createdBy": "Luis",
        }))
        .unwrap()
    }

    fn comment_at(id: &str, created_at: &str) -> Comment {
        serde_json::from_value(serde_json::json!({
            "_firestore_id": id,
            "text": "hola",
            "authorName": "Ana",
            "authorId": "uid-ana",
            "createdAt": created_at,
        }))
        .unwrap()
    }

    #[test]
    fn test_task_order_newest_first() {
        let mut tasks = vec![
            task_at("a", "2024-01-15T10:00:00Z"),
            task_at("b", "2024-01-16T10:00:00Z"),
            task_at("c", "2024-01-14T10:00:00Z"),
        ];
        tasks.sort_by(task_order);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_comment_order_oldest_first() {
        let mut comments = vec![
            comment_at("a", "2024-01-15T10:00:02Z"),
            comment_at("b", "2024-01-15T10:00:00Z"),
            comment_at("c", "2024-01-15T10:00:01Z"),
        ];
        comments.sort_by(comment_order);
        let ids: Vec<_> = comments.iter().map(|c| c.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_offline_mock_reports_database_error() {
        let db = FirestoreDb::new_mock();
        assert!(db.get_client().is_err());
    }
}
