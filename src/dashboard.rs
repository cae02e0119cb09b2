// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregation over the synced task and user lists.
//!
//! Purely derived, recomputed whenever either input changes; nothing is
//! persisted.

use std::collections::HashMap;

use crate::models::{Task, TaskStatus, User};
use crate::view::display_assignee;

/// Per-user workload line on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWorkload {
    pub uid: String,
    pub name: String,
    /// Tasks currently assigned to this user
    pub assigned: usize,
    /// assigned / total × 100, rendered as a proportional bar.
    /// Exactly 0 when the total is 0.
    pub percentage: f64,
}

/// Dashboard totals derived from the board and directory mirrors.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub by_status: HashMap<TaskStatus, usize>,
    pub workloads: Vec<UserWorkload>,
}

impl DashboardStats {
    pub fn count(&self, status: TaskStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Compute dashboard stats from the current mirrors.
    ///
    /// A task counts toward a user when its resolved assignee name equals
    /// that user's name. Workload order follows the directory order.
    pub fn compute(users: &[User], tasks: &[Task]) -> Self {
        let total = tasks.len();

        let mut by_status = HashMap::new();
        for task in tasks {
            *by_status.entry(task.status).or_insert(0) += 1;
        }

        let workloads = users
            .iter()
            .map(|user| {
                let assigned = tasks
                    .iter()
                    .filter(|t| display_assignee(t, users) == user.name)
                    .count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    assigned as f64 / total as f64 * 100.0
                };
                UserWorkload {
                    uid: user.uid.clone(),
                    name: user.name.clone(),
                    assigned,
                    percentage,
                }
            })
            .collect();

        Self {
            total,
            by_status,
            workloads,
        }
    }
}
