// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live view-state synchronization.
//!
//! Each store mirrors one remote collection for the lifetime of its
//! owning scope: the session/directory for the whole process, the task
//! board while a session exists, a comment thread while its panel is
//! open.

pub mod board;
pub mod comments;
pub mod session;

pub use board::TaskBoard;
pub use comments::CommentThread;
pub use session::SessionStore;
