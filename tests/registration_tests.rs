// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and provisioning flows against the emulators.
//!
//! These need both FIRESTORE_EMULATOR_HOST and FIREBASE_AUTH_EMULATOR_HOST.

mod common;

use std::sync::Arc;

use taysync::config::Config;
use taysync::models::Role;
use taysync::services::{DirectoryService, IdentityClient};

fn unique_email(label: &str) -> String {
    format!("{}-{}@x.com", label, chrono::Utc::now().timestamp_micros())
}

async fn directory_service() -> DirectoryService {
    let db = common::test_db().await;
    let identity = Arc::new(IdentityClient::new(&Config::default()));
    DirectoryService::new(db, identity)
}

#[tokio::test]
async fn test_first_registration_forces_coordinator_role() {
    require_auth_emulator!();
    let svc = directory_service().await;

    if !svc.registration_open().await.expect("directory readable") {
        eprintln!("⚠️  Skipping: directory not empty, first-registration path untestable");
        return;
    }

    // Requesting Collaborator must still yield Coordinator
    let ana = svc
        .register_first_user("Ana", &unique_email("ana"), "secret123", Role::Collaborator)
        .await
        .expect("first registration");

    assert_eq!(ana.role, Role::Coordinator);
    assert_eq!(ana.name, "Ana");

    // Registration closes once the directory has a user
    assert!(!svc.registration_open().await.expect("directory readable"));
    let err = svc
        .register_first_user("Luis", &unique_email("luis"), "secret123", Role::Coordinator)
        .await
        .unwrap_err();
    assert!(matches!(err, taysync::error::AppError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_provisioning_keeps_the_actors_session() {
    require_auth_emulator!();
    let db = common::test_db().await;
    let identity = Arc::new(IdentityClient::new(&Config::default()));
    let svc = DirectoryService::new(db, identity.clone());

    // Acting coordinator signs in on the primary context
    let email = unique_email("coord");
    let auth = identity.sign_up(&email, "secret123").await.expect("sign up");
    let coordinator = taysync::models::User {
        uid: auth.uid.clone(),
        name: "Coord".to_string(),
        email: auth.email.clone(),
        role: Role::Coordinator,
    };

    let provisioned = svc
        .provision_user(
            &coordinator,
            "Pedro",
            &unique_email("pedro"),
            "secret123",
            Role::Collaborator,
        )
        .await
        .expect("provision");

    assert_eq!(provisioned.role, Role::Collaborator);
    assert_ne!(provisioned.uid, coordinator.uid);

    // The secondary context never replaced the primary session
    let current = identity.current_identity().expect("still signed in");
    assert_eq!(current.uid, coordinator.uid);

    // Duplicate email surfaces only the generic credentials error
    let err = svc
        .provision_user(&coordinator, "Dup", &provisioned.email, "secret123", Role::Collaborator)
        .await
        .unwrap_err();
    assert!(err.is_credentials_error());

    identity.sign_out();
}
