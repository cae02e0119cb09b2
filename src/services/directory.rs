// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directory administration: registration, provisioning, role changes.
//!
//! User deletion is deliberately not implemented. The client is not a
//! trusted execution context for identity-provider administrative
//! operations, so deletion must go through a trusted backend.

use std::sync::Arc;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Role, User};
use crate::services::identity::IdentityClient;

/// Directory record administration.
#[derive(Clone)]
pub struct DirectoryService {
    db: FirestoreDb,
    identity: Arc<IdentityClient>,
}

impl DirectoryService {
    pub fn new(db: FirestoreDb, identity: Arc<IdentityClient>) -> Self {
        Self { db, identity }
    }

    /// Whether self-registration is currently offered.
    ///
    /// Only an empty directory accepts registration; every later account
    /// is provisioned by a coordinator.
    pub async fn registration_open(&self) -> Result<bool> {
        Ok(self.db.list_users().await?.is_empty())
    }

    /// Register the first account.
    ///
    /// The first user is always granted Coordinator, whatever role was
    /// requested. Signs the new account in on the primary context.
    pub async fn register_first_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        requested_role: Role,
    ) -> Result<User> {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name must not be empty".to_string()));
        }
        if !self.registration_open().await? {
            return Err(AppError::PermissionDenied(
                "Registration is closed once the directory has users".to_string(),
            ));
        }
        if requested_role != Role::Coordinator {
            tracing::debug!(?requested_role, "First registration forces Coordinator role");
        }

        let identity = self.identity.sign_up(email, password).await?;

        let user = User {
            uid: identity.uid,
            name: name.trim().to_string(),
            email: identity.email,
            role: Role::Coordinator,
        };
        self.db.upsert_user(&user).await?;

        tracing::info!(uid = %user.uid, "First coordinator registered");
        Ok(user)
    }

    /// Provision a new account (coordinator-only).
    ///
    /// The credential is created on a secondary, isolated auth context so
    /// the acting coordinator's own session is not replaced by the new
    /// account.
    pub async fn provision_user(
        &self,
        actor: &User,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User> {
        if !actor.is_coordinator() {
            return Err(AppError::PermissionDenied("provision users".to_string()));
        }
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name must not be empty".to_string()));
        }

        let identity = self.identity.provision_credential(email, password).await?;

        let user = User {
            uid: identity.uid,
            name: name.trim().to_string(),
            email: identity.email,
            role,
        };
        self.db.upsert_user(&user).await?;

        tracing::info!(uid = %user.uid, role = role.label(), "User provisioned");
        Ok(user)
    }

    /// Change a user's role (coordinator-only).
    ///
    /// A coordinator cannot change their own role; that requires a second
    /// coordinator.
    pub async fn change_role(&self, actor: &User, target_uid: &str, role: Role) -> Result<()> {
        if !actor.is_coordinator() {
            return Err(AppError::PermissionDenied("change roles".to_string()));
        }
        if actor.uid == target_uid {
            return Err(AppError::PermissionDenied(
                "change your own role (ask another coordinator)".to_string(),
            ));
        }

        self.db.set_user_role(target_uid, role).await?;
        tracing::info!(uid = target_uid, role = role.label(), "Role changed");
        Ok(())
    }

    /// Deleting users from the client is refused by policy.
    pub fn delete_user(&self, _actor: &User, _target_uid: &str) -> Result<()> {
        Err(AppError::UserDeletionDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DirectoryService {
        let identity = Arc::new(IdentityClient::with_base_url(
            "http://localhost:9099/identitytoolkit.googleapis.com/v1".to_string(),
            "test_api_key".to_string(),
        ));
        DirectoryService::new(FirestoreDb::new_mock(), identity)
    }

    fn user(uid: &str, role: Role) -> User {
        User {
            uid: uid.to_string(),
            name: uid.to_string(),
            email: format!("{}@x.com", uid),
            role,
        }
    }

    #[tokio::test]
    async fn test_collaborator_cannot_provision() {
        let svc = service();
        let actor = user("ana", Role::Collaborator);
        let err = svc
            .provision_user(&actor, "Luis", "luis@x.com", "secret123", Role::Collaborator)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_coordinator_cannot_change_own_role() {
        let svc = service();
        let actor = user("coord", Role::Coordinator);
        let err = svc
            .change_role(&actor, "coord", Role::Collaborator)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[test]
    fn test_user_deletion_is_refused() {
        let svc = service();
        let actor = user("coord", Role::Coordinator);
        let err = svc.delete_user(&actor, "other").unwrap_err();
        assert!(matches!(err, AppError::UserDeletionDisabled));
    }
}
