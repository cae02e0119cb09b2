// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Taysync: kanban-style task coordination on a hosted document store.
//!
//! This crate implements the client-side state model: live mirrors of the
//! remote user/task/comment collections, a session store fed by the
//! identity provider, the role-scoped visibility rules, and the dashboard
//! aggregation. Rendering is out of scope; the exported state is what a
//! UI layer would draw.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod permissions;
pub mod prefs;
pub mod services;
pub mod sync;
pub mod time_utils;
pub mod view;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{BoardService, CommentService, DirectoryService, IdentityClient};

/// Shared application state: the one configured connection handle plus
/// the services built on it, constructed once at process start and passed
/// by reference to everything that needs it.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: Arc<IdentityClient>,
    pub directory_service: DirectoryService,
    pub board_service: BoardService,
    pub comment_service: CommentService,
}

impl AppState {
    /// Wire up all services over one database handle and one identity
    /// client.
    pub fn new(config: Config, db: FirestoreDb, identity: Arc<IdentityClient>) -> Self {
        let directory_service = DirectoryService::new(db.clone(), identity.clone());
        let board_service = BoardService::new(db.clone());
        let comment_service = CommentService::new(db.clone());
        Self {
            config,
            db,
            identity,
            directory_service,
            board_service,
            comment_service,
        }
    }
}
