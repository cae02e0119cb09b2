// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-task permission matrix.
//!
//! Evaluated per task, per actor:
//!
//! | Action              | Coordinator | Assignee | Other collaborator |
//! |---------------------|-------------|----------|--------------------|
//! | change status       | yes         | yes      | no                 |
//! | edit text/priority  | yes         | no       | no                 |
//! | change delivery date| yes         | yes      | no                 |
//! | reassign            | yes         | no       | no                 |
//! | delete              | yes         | no       | no                 |
//! | comment             | yes         | yes      | yes                |

use crate::error::{AppError, Result};
use crate::models::{Task, TaskPatch, User};

/// Actions an actor can attempt on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    ChangeStatus,
    /// Title, description or priority edit
    EditDetails,
    ChangeDeliveryDate,
    Reassign,
    Delete,
    Comment,
}

/// Whether `actor` may perform `action` on `task`.
pub fn is_allowed(actor: &User, task: &Task, action: TaskAction) -> bool {
    if actor.is_coordinator() {
        return true;
    }
    let is_assignee = task.is_assigned_to(&actor.uid, &actor.name);
    match action {
        TaskAction::ChangeStatus | TaskAction::ChangeDeliveryDate => is_assignee,
        TaskAction::EditDetails | TaskAction::Reassign | TaskAction::Delete => false,
        TaskAction::Comment => true,
    }
}

/// Check a single action, producing a [`AppError::PermissionDenied`] with a
/// description of the refused action.
pub fn check(actor: &User, task: &Task, action: TaskAction) -> Result<()> {
    if is_allowed(actor, task, action) {
        return Ok(());
    }
    let what = match action {
        TaskAction::ChangeStatus => "change task status",
        TaskAction::EditDetails => "edit task details",
        TaskAction::ChangeDeliveryDate => "change delivery date",
        TaskAction::Reassign => "reassign task",
        TaskAction::Delete => "delete task",
        TaskAction::Comment => "comment on task",
    };
    Err(AppError::PermissionDenied(what.to_string()))
}

/// Check every field touched by a patch against the matrix.
pub fn check_patch(actor: &User, task: &Task, patch: &TaskPatch) -> Result<()> {
    if patch.touches_text_or_priority() {
        check(actor, task, TaskAction::EditDetails)?;
    }
    if patch.status.is_some() {
        check(actor, task, TaskAction::ChangeStatus)?;
    }
    if patch.delivery_date.is_some() {
        check(actor, task, TaskAction::ChangeDeliveryDate)?;
    }
    if patch.assignee.is_some() {
        check(actor, task, TaskAction::Reassign)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TaskStatus};

    fn coordinator() -> User {
        User {
            uid: "uid-coord".to_string(),
            name: "Luis".to_string(),
            email: "luis@x.com".to_string(),
            role: Role::Coordinator,
        }
    }

    fn collaborator(uid: &str, name: &str) -> User {
        User {
            uid: uid.to_string(),
            name: name.to_string(),
            email: format!("{}@x.com", uid),
            role: Role::Collaborator,
        }
    }

    fn task_assigned_to(name: &str, uid: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "title": "Draft report",
            "description": "Q1 numbers",
            "assignedTo": name,
            "assigneeUid": uid,
            "status": "pending",
            "createdAt": "2024-01-15T10:00:00Z",
            "assignmentDate": "2024-01-15T10:00:00Z",
            "createdBy": "Luis",
        }))
        .unwrap()
    }

    #[test]
    fn test_coordinator_allowed_everything() {
        let task = task_assigned_to("Ana", "uid-ana");
        let coord = coordinator();
        for action in [
            TaskAction::ChangeStatus,
            TaskAction::EditDetails,
            TaskAction::ChangeDeliveryDate,
            TaskAction::Reassign,
            TaskAction::Delete,
            TaskAction::Comment,
        ] {
            assert!(is_allowed(&coord, &task, action));
        }
    }

    #[test]
    fn test_assignee_may_change_status_not_title() {
        let task = task_assigned_to("Ana", "uid-ana");
        let ana = collaborator("uid-ana", "Ana");

        assert!(check(&ana, &task, TaskAction::ChangeStatus).is_ok());
        assert!(check(&ana, &task, TaskAction::ChangeDeliveryDate).is_ok());
        assert!(matches!(
            check(&ana, &task, TaskAction::EditDetails),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_non_assignee_collaborator_may_only_comment() {
        let task = task_assigned_to("Ana", "uid-ana");
        let luis = collaborator("uid-luis", "Luis2");

        assert!(is_allowed(&luis, &task, TaskAction::Comment));
        assert!(!is_allowed(&luis, &task, TaskAction::ChangeStatus));
        assert!(!is_allowed(&luis, &task, TaskAction::ChangeDeliveryDate));
        assert!(!is_allowed(&luis, &task, TaskAction::Delete));
        assert!(!is_allowed(&luis, &task, TaskAction::Reassign));
    }

    #[test]
    fn test_patch_checked_field_by_field() {
        let task = task_assigned_to("Ana", "uid-ana");
        let ana = collaborator("uid-ana", "Ana");

        // Status-only patch is fine for the assignee
        let patch = TaskPatch::status(TaskStatus::InProgress);
        assert!(check_patch(&ana, &task, &patch).is_ok());

        // Mixing in a title edit makes the whole patch fail
        let patch = TaskPatch {
            title: Some("New title".to_string()),
            status: Some(TaskStatus::InProgress),
            ..TaskPatch::default()
        };
        assert!(check_patch(&ana, &task, &patch).is_err());
    }
}
