// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: pairs the identity stream with the directory mirror.
//!
//! The active session is the directory record matching the authenticated
//! identity's uid. An identity with no matching record in a non-empty
//! directory is signed out: an identity without a role cannot be
//! authorized for anything. While the directory is still empty the
//! identity is left pending so first-user registration can complete.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::db::{CollectionMirror, FirestoreDb};
use crate::models::User;
use crate::services::IdentityClient;

/// Live session state: the authenticated profile (with role) and the
/// directory mirror.
pub struct SessionStore {
    current_user_rx: watch::Receiver<Option<User>>,
    users_rx: watch::Receiver<Vec<User>>,
    users_mirror: Option<CollectionMirror<User>>,
    // Keeps the fallback channel alive when the directory subscription
    // failed and we degraded to an empty directory.
    _fallback_users_tx: Option<watch::Sender<Vec<User>>>,
    driver: JoinHandle<()>,
}

impl SessionStore {
    /// Subscribe to the directory and the identity stream.
    ///
    /// A directory subscription failure is logged and degrades to an
    /// empty directory; it never fails activation.
    pub async fn start(db: &FirestoreDb, identity: Arc<IdentityClient>) -> Self {
        match db.watch_users().await {
            Ok(mirror) => {
                let rx = mirror.subscribe();
                let mut store = Self::with_directory_stream(identity, rx);
                store.users_mirror = Some(mirror);
                store
            }
            Err(e) => {
                tracing::error!(error = %e, "Directory subscription failed, treating directory as empty");
                let (tx, rx) = watch::channel(Vec::new());
                let mut store = Self::with_directory_stream(identity, rx);
                store._fallback_users_tx = Some(tx);
                store
            }
        }
    }

    /// Pair the identity stream with an externally supplied directory
    /// stream (tests).
    pub fn with_directory_stream(
        identity: Arc<IdentityClient>,
        users_rx: watch::Receiver<Vec<User>>,
    ) -> Self {
        let (current_tx, current_user_rx) = watch::channel(None);
        let driver = tokio::spawn(Self::drive(identity, users_rx.clone(), current_tx));
        Self {
            current_user_rx,
            users_rx,
            users_mirror: None,
            _fallback_users_tx: None,
            driver,
        }
    }

    /// React to identity and directory changes until either stream ends.
    async fn drive(
        identity: Arc<IdentityClient>,
        mut users_rx: watch::Receiver<Vec<User>>,
        current_tx: watch::Sender<Option<User>>,
    ) {
        let mut identity_rx = identity.identity_stream();

        loop {
            let session = {
                let auth = identity_rx.borrow().clone();
                let users = users_rx.borrow();
                match auth {
                    None => None,
                    Some(auth) => match users.iter().find(|u| u.uid == auth.uid) {
                        Some(user) => Some(user.clone()),
                        None if users.is_empty() => {
                            // Directory still loading or awaiting first
                            // registration; leave the identity pending.
                            None
                        }
                        None => {
                            tracing::warn!(
                                uid = %auth.uid,
                                "Authenticated identity has no directory record, signing out"
                            );
                            identity.sign_out();
                            None
                        }
                    },
                }
            };

            current_tx.send_if_modified(|current| {
                let changed = match (&*current, &session) {
                    (Some(a), Some(b)) => a.uid != b.uid || a.role != b.role || a.name != b.name,
                    (None, None) => false,
                    _ => true,
                };
                if changed {
                    *current = session.clone();
                }
                changed
            });

            tokio::select! {
                changed = identity_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = users_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    }

    /// The active session, if any.
    pub fn current_user(&self) -> Option<User> {
        self.current_user_rx.borrow().clone()
    }

    /// Change notifications for the active session.
    pub fn watch_current_user(&self) -> watch::Receiver<Option<User>> {
        self.current_user_rx.clone()
    }

    /// All registered users.
    pub fn all_users(&self) -> Vec<User> {
        self.users_rx.borrow().clone()
    }

    /// Change notifications for the directory.
    pub fn watch_users(&self) -> watch::Receiver<Vec<User>> {
        self.users_rx.clone()
    }

    /// Tear down the directory subscription and the driver. Consumes the
    /// store, so teardown runs exactly once.
    pub async fn shutdown(self) {
        self.driver.abort();
        if let Some(mirror) = self.users_mirror {
            if let Err(e) = mirror.shutdown().await {
                tracing::warn!(error = %e, "Directory mirror shutdown failed");
            }
        }
    }
}
