// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task model and the field-level patch applied by board mutations.

use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// Wire values match the original collection contents; `label()` returns
/// the Spanish strings shown in the column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Spanish display label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendiente",
            TaskStatus::InProgress => "En Progreso",
            TaskStatus::Completed => "Completada",
        }
    }

    /// Parse either the wire value or the display label.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "pending" | "Pendiente" => Some(TaskStatus::Pending),
            "in-progress" | "En Progreso" => Some(TaskStatus::InProgress),
            // Early iterations labeled the column "Completado"
            "completed" | "Completada" | "Completado" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Task priority, added in later iterations and therefore optional on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Spanish display label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Baja",
            TaskPriority::Medium => "Media",
            TaskPriority::High => "Alta",
        }
    }

    /// Parse either the wire value or the display label.
    pub fn parse(s: &str) -> Option<TaskPriority> {
        match s {
            "low" | "Baja" => Some(TaskPriority::Low),
            "medium" | "Media" => Some(TaskPriority::Medium),
            "high" | "Alta" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// Task document stored in the `tasks` collection.
///
/// `assigned_to` is the assignee's display name copied at assignment time;
/// `assignee_uid` is the stable identity-provider uid stored alongside it so
/// that a rename does not desynchronize assignments. Visibility and
/// permission checks prefer the uid when present and fall back to the name
/// for documents written by earlier iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Firestore document ID (populated on read, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    /// Assignee display name (denormalized copy)
    pub assigned_to: String,
    /// Stable uid of the assignee, absent on legacy documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Creation timestamp (RFC3339 UTC)
    pub created_at: String,
    /// When the task was (re)assigned (RFC3339 UTC)
    pub assignment_date: String,
    /// Agreed delivery date, if any (RFC3339 UTC)
    #[serde(default)]
    pub delivery_date: Option<String>,
    /// Display name of the coordinator who created the task
    pub created_by: String,
}

impl Task {
    /// Whether `user` is the assignee of this task.
    ///
    /// Matches on the stable uid when the document carries one, otherwise
    /// on the denormalized display name.
    pub fn is_assigned_to(&self, uid: &str, name: &str) -> bool {
        match &self.assignee_uid {
            Some(assignee) => assignee == uid,
            None => self.assigned_to == name,
        }
    }
}

/// Field-level patch for task updates.
///
/// Only fields set to `Some` are written; `delivery_date` distinguishes
/// "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub delivery_date: Option<Option<String>>,
    /// New assignee as (display name, uid)
    pub assignee: Option<(String, String)>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.delivery_date.is_none()
            && self.assignee.is_none()
    }

    /// Whether the patch touches task text or priority (coordinator-only
    /// fields in the permission matrix).
    pub fn touches_text_or_priority(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.priority.is_some()
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
