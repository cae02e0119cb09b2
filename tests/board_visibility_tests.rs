// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-scoped visibility and filter behavior over the derived board.

mod common;

use common::{task, user};
use taysync::models::{Role, TaskStatus};
use taysync::view::{derive_board, is_visible_to, TaskFilter};

#[test]
fn test_collaborator_visible_set_is_own_union_completed() {
    let ana = user("Ana", Role::Collaborator);
    let tasks = vec![
        task("A1", "Ana", "pending"),
        task("A2", "Ana", "in-progress"),
        task("B1", "Pedro", "pending"),
        task("B2", "Pedro", "in-progress"),
        task("B3", "Pedro", "completed"),
        task("C1", "Maria", "completed"),
    ];

    let visible: Vec<String> = tasks
        .iter()
        .filter(|t| is_visible_to(&ana, t))
        .map(|t| t.title.clone())
        .collect();

    // {t : assignee = Ana} ∪ {t : status = Completed}
    let expected: Vec<String> = tasks
        .iter()
        .filter(|t| t.assigned_to == ana.name || t.status == TaskStatus::Completed)
        .map(|t| t.title.clone())
        .collect();

    assert_eq!(visible, expected);
    assert_eq!(visible, vec!["A1", "A2", "B3", "C1"]);
}

#[test]
fn test_coordinator_visible_set_is_everything() {
    let coord = user("Luis", Role::Coordinator);
    let tasks = vec![
        task("A1", "Ana", "pending"),
        task("B1", "Pedro", "in-progress"),
        task("B2", "Pedro", "completed"),
    ];
    assert!(tasks.iter().all(|t| is_visible_to(&coord, t)));
}

#[test]
fn test_pending_task_hidden_until_completed() {
    // Collaborator "Luis" is not assigned to T while T is "Pendiente"
    let luis = user("Luis", Role::Collaborator);
    let mut t = task("T", "Ana", "pending");

    let view = derive_board(&luis, &[], std::slice::from_ref(&t), &TaskFilter::default());
    assert_eq!(view.total(), 0);

    // Once T becomes "Completada", it appears on Luis's board
    t.status = TaskStatus::parse("Completada").unwrap();
    let view = derive_board(&luis, &[], std::slice::from_ref(&t), &TaskFilter::default());
    assert_eq!(view.count(TaskStatus::Completed), 1);
}

#[test]
fn test_new_coordinator_task_lands_in_pending_bucket() {
    let coord = user("Luis", Role::Coordinator);
    let mut tasks = vec![task("Existing", "Ana", "pending")];
    let before = derive_board(&coord, &[], &tasks, &TaskFilter::default());

    // Coordinator creates {title:"Draft report", assignedTo:"Ana", priority:"Alta"}
    let mut new_task = task("Draft report", "Ana", "pending");
    new_task.priority = taysync::models::TaskPriority::parse("Alta");
    tasks.insert(0, new_task);

    let after = derive_board(&coord, &[], &tasks, &TaskFilter::default());
    assert_eq!(
        after.count(TaskStatus::Pending),
        before.count(TaskStatus::Pending) + 1
    );
    assert_eq!(after.pending[0].title, "Draft report");
    assert_eq!(
        after.pending[0].priority,
        Some(taysync::models::TaskPriority::High)
    );
}

#[test]
fn test_search_and_assignee_filters_compose_before_visibility() {
    let coord = user("Luis", Role::Coordinator);
    let tasks = vec![
        task("Draft report", "Ana", "pending"),
        task("Draft slides", "Pedro", "pending"),
        task("Review report", "Ana", "completed"),
    ];

    let filter = TaskFilter {
        search: "report".to_string(),
        assignee: "Ana".to_string(),
    };
    let view = derive_board(&coord, &[], &tasks, &filter);
    assert_eq!(view.total(), 2);
    assert_eq!(view.pending[0].title, "Draft report");
    assert_eq!(view.completed[0].title, "Review report");

    // Empty filters impose no restriction
    let view = derive_board(&coord, &[], &tasks, &TaskFilter::default());
    assert_eq!(view.total(), 3);
}

#[test]
fn test_bucket_counts_match_bucket_lengths() {
    let coord = user("Luis", Role::Coordinator);
    let tasks = vec![
        task("A", "Ana", "pending"),
        task("B", "Ana", "pending"),
        task("C", "Pedro", "in-progress"),
        task("D", "Maria", "completed"),
    ];
    let view = derive_board(&coord, &[], &tasks, &TaskFilter::default());
    for status in TaskStatus::ALL {
        assert_eq!(view.count(status), view.bucket(status).len());
    }
    assert_eq!(view.total(), 4);
}
