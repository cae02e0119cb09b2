// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use taysync::config::Config;
use taysync::db::FirestoreDb;
use taysync::models::{Role, Task, User};
use taysync::services::IdentityClient;
use taysync::AppState;

/// Check if the Firestore emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Check if the Auth emulator is available as well.
#[allow(dead_code)]
pub fn auth_emulator_available() -> bool {
    std::env::var("FIREBASE_AUTH_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Skip test unless both the Firestore and Auth emulators are available.
#[macro_export]
macro_rules! require_auth_emulator {
    () => {
        crate::require_emulator!();
        if !crate::common::auth_emulator_available() {
            eprintln!("⚠️  Skipping: FIREBASE_AUTH_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create test app state with offline mock dependencies.
#[allow(dead_code)]
pub fn create_test_state() -> Arc<AppState> {
    let config = Config::default();
    let db = test_db_offline();
    let identity = Arc::new(IdentityClient::with_base_url(
        "http://localhost:9099/identitytoolkit.googleapis.com/v1".to_string(),
        config.api_key.clone(),
    ));
    Arc::new(AppState::new(config, db, identity))
}

/// Directory record fixture.
#[allow(dead_code)]
pub fn user(name: &str, role: Role) -> User {
    User {
        uid: format!("uid-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase().replace(' ', ".")),
        role,
    }
}

/// Task fixture in stored wire format.
#[allow(dead_code)]
pub fn task(title: &str, assignee: &str, status: &str) -> Task {
    serde_json::from_value(serde_json::json!({
        "_firestore_id": format!("task-{}", title.to_lowercase().replace(' ', "-")),
        "title": title,
        "description": format!("{} description", title),
        "assignedTo": assignee,
        "status": status,
        "createdAt": "2024-01-15T10:00:00Z",
        "assignmentDate": "2024-01-15T10:00:00Z",
        "deliveryDate": null,
        "createdBy": "Luis",
    }))
    .expect("valid task fixture")
}
