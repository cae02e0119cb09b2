// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for the directory collection.

use serde::{Deserialize, Serialize};

/// Role assigned to a registered user.
///
/// Coordinators have full read/write authority over tasks and users.
/// Collaborators are restricted to tasks assigned to them, plus read
/// access to completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coordinator,
    Collaborator,
}

impl Role {
    /// Spanish display label, matching the original UI strings.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Coordinator => "Coordinador",
            Role::Collaborator => "Colaborador",
        }
    }
}

/// User profile stored in Firestore.
///
/// Documents are keyed by the identity provider's uid, so the uid field
/// doubles as the document ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider uid (also used as document ID)
    pub uid: String,
    /// Display name shown on the board and copied into task assignments
    pub name: String,
    /// Email address used for sign-in
    pub email: String,
    /// Assigned role
    pub role: Role,
}

impl User {
    pub fn is_coordinator(&self) -> bool {
        self.role == Role::Coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Coordinator).unwrap();
        assert_eq!(json, "\"coordinator\"");
        let back: Role = serde_json::from_str("\"collaborator\"").unwrap();
        assert_eq!(back, Role::Collaborator);
    }
}
