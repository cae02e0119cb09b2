// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Taysync headless client shell.
//!
//! Boots the synchronization runtime without a UI: connects to Firestore,
//! starts the session store, and while a session exists mirrors the task
//! board, logging the derived view on every remote change. A renderer
//! would consume the same stores.

use std::sync::Arc;

use taysync::{
    config::Config,
    dashboard::DashboardStats,
    db::FirestoreDb,
    models::TaskStatus,
    prefs::PreferenceStore,
    services::IdentityClient,
    sync::{SessionStore, TaskBoard},
    view::TaskFilter,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(app = %config.app_id, "Starting Taysync client");

    // Local display preference, read once at startup
    match PreferenceStore::new() {
        Ok(store) => {
            let prefs = store.load();
            tracing::info!(dark_mode = prefs.dark_mode, "Display preferences loaded");
        }
        Err(e) => tracing::warn!(error = %e, "No preference store available"),
    }

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Identity provider client (owns the identity-change stream)
    let identity = Arc::new(IdentityClient::new(&config));

    // Build shared state
    let state = Arc::new(AppState::new(config, db.clone(), identity.clone()));

    // Session & directory sync runs for the whole process lifetime
    let session = SessionStore::start(&state.db, identity.clone()).await;

    tracing::info!("Client running, Ctrl-C to stop");
    run(&state, &session).await;

    session.shutdown().await;
    tracing::info!("Client stopped");
    Ok(())
}

/// Alternate between "waiting for a session" and "board active" until
/// interrupted.
async fn run(state: &AppState, session: &SessionStore) {
    let mut current_user_rx = session.watch_current_user();

    loop {
        // Wait for a session
        while current_user_rx.borrow_and_update().is_none() {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => return,
                changed = current_user_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
        let user = match session.current_user() {
            Some(user) => user,
            None => continue,
        };
        tracing::info!(uid = %user.uid, role = user.role.label(), "Session active");

        // Task board sync runs only while the session exists. A failed
        // subscription shows up as an empty board and is retried on the
        // next session change.
        let board = TaskBoard::start(&state.db).await;
        let interrupted = watch_board(session, &board, &mut current_user_rx).await;

        if let Err(e) = board.shutdown().await {
            tracing::warn!(error = %e, "Task board shutdown failed");
        }
        if interrupted {
            return;
        }
        tracing::info!("No active session");
    }
}

/// Log the derived board on every remote change until the session ends.
/// Returns true when interrupted by Ctrl-C.
async fn watch_board(
    session: &SessionStore,
    board: &TaskBoard,
    current_user_rx: &mut tokio::sync::watch::Receiver<Option<taysync::models::User>>,
) -> bool {
    let mut board_rx = board.watch();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return true,

            changed = current_user_rx.changed() => {
                if changed.is_err() || current_user_rx.borrow().is_none() {
                    return false;
                }
            }

            changed = board_rx.changed() => {
                if changed.is_err() {
                    return false;
                }
                if let Some(user) = session.current_user() {
                    let users = session.all_users();
                    let view = board.view_for(&user, &users, &TaskFilter::default());
                    let stats = DashboardStats::compute(&users, &board.tasks());
                    tracing::info!(
                        pending = view.count(TaskStatus::Pending),
                        in_progress = view.count(TaskStatus::InProgress),
                        completed = view.count(TaskStatus::Completed),
                        total = stats.total,
                        "Board updated"
                    );
                }
            }
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taysync=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
