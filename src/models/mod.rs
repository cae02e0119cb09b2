// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod comment;
pub mod task;
pub mod user;

pub use comment::Comment;
pub use task::{Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::{Role, User};
