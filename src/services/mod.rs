// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod board;
pub mod comments;
pub mod directory;
pub mod identity;

pub use board::{BoardService, NewTask};
pub use comments::CommentService;
pub use directory::DirectoryService;
pub use identity::{AuthIdentity, IdentityClient};
