// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live collection mirrors built on Firestore listen targets.
//!
//! Each mirror owns exactly one listener. Remote document changes land in
//! a concurrent map keyed by document path; after every event the mirror
//! publishes a freshly sorted snapshot through a `watch` channel, so
//! consumers always observe whole-collection state, never partial edits.
//! Teardown happens exactly once, by consuming the mirror.

use std::cmp::Ordering;
use std::sync::Arc;

use dashmap::DashMap;
use firestore::{FirestoreListenEvent, FirestoreListener, FirestoreMemListenStateStorage};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::error::{AppError, Result};

/// A live, always-sorted mirror of one remote collection (or one task's
/// comment sub-collection).
pub struct CollectionMirror<T> {
    rx: watch::Receiver<Vec<T>>,
    listener: FirestoreListener<firestore::FirestoreDb, FirestoreMemListenStateStorage>,
    collection: &'static str,
}

impl<T> CollectionMirror<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Attach a listener to `query` and start mirroring.
    ///
    /// `sort_by` orders every published snapshot; delivery order from the
    /// listen channel is otherwise unspecified, so consumers must never
    /// rely on it.
    pub(crate) async fn start(
        db: &firestore::FirestoreDb,
        collection: &'static str,
        parent: Option<firestore::ParentPathBuilder>,
        target: firestore::FirestoreListenerTarget,
        sort_by: fn(&T, &T) -> Ordering,
    ) -> Result<Self> {
        let mut listener = db
            .create_listener(FirestoreMemListenStateStorage::new())
            .await
            .map_err(|e| AppError::Database(format!("Failed to create listener: {}", e)))?;

        let select = db.fluent().select().from(collection);
        let select = match parent {
            Some(parent_path) => select.parent(parent_path),
            None => select,
        };
        select
            .listen()
            .add_target(target, &mut listener)
            .map_err(|e| AppError::Database(format!("Failed to add listen target: {}", e)))?;

        let (tx, rx) = watch::channel(Vec::new());
        let docs: Arc<DashMap<String, T>> = Arc::new(DashMap::new());

        Self::run(&mut listener, collection, docs, tx, sort_by).await?;

        Ok(Self {
            rx,
            listener,
            collection,
        })
    }

    async fn run(
        listener: &mut FirestoreListener<firestore::FirestoreDb, FirestoreMemListenStateStorage>,
        collection: &'static str,
        docs: Arc<DashMap<String, T>>,
        tx: watch::Sender<Vec<T>>,
        sort_by: fn(&T, &T) -> Ordering,
    ) -> Result<()> {
        listener
            .start(move |event| {
                let docs = docs.clone();
                let tx = tx.clone();
                async move {
                    match event {
                        FirestoreListenEvent::DocumentChange(ref change) => {
                            if let Some(doc) = &change.document {
                                match firestore::FirestoreDb::deserialize_doc_to::<T>(doc) {
                                    Ok(obj) => {
                                        docs.insert(doc.name.clone(), obj);
                                    }
                                    Err(e) => {
                                        // Skip the malformed document; the
                                        // rest of the mirror stays usable.
                                        tracing::error!(
                                            collection,
                                            doc = %doc.name,
                                            error = %e,
                                            "Failed to deserialize changed document"
                                        );
                                    }
                                }
                            }
                            publish(&docs, &tx, sort_by);
                        }
                        FirestoreListenEvent::DocumentDelete(ref deleted) => {
                            docs.remove(&deleted.document);
                            publish(&docs, &tx, sort_by);
                        }
                        FirestoreListenEvent::TargetChange(_) => {}
                        other => {
                            tracing::trace!(collection, ?other, "Ignoring listen event");
                        }
                    }
                    Ok(())
                }
            })
            .await
            .map_err(|e| AppError::Database(format!("Failed to start listener: {}", e)))?;

        tracing::debug!(collection, "Collection mirror started");
        Ok(())
    }

    /// Current snapshot of the mirrored collection, sorted.
    pub fn snapshot(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Receiver for change notifications. Each received value is a full
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.rx.clone()
    }

    /// Tear the subscription down. Consumes the mirror, so teardown can
    /// only happen once.
    pub async fn shutdown(mut self) -> Result<()> {
        self.listener
            .shutdown()
            .await
            .map_err(|e| AppError::Database(format!("Failed to shut down listener: {}", e)))?;
        tracing::debug!(collection = self.collection, "Collection mirror stopped");
        Ok(())
    }
}

fn publish<T: Clone>(
    docs: &DashMap<String, T>,
    tx: &watch::Sender<Vec<T>>,
    sort_by: fn(&T, &T) -> Ordering,
) {
    let mut snapshot: Vec<T> = docs.iter().map(|entry| entry.value().clone()).collect();
    snapshot.sort_by(sort_by);
    // Receivers may all be gone during teardown; that is not an error.
    let _ = tx.send(snapshot);
}
