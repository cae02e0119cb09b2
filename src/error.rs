// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every failed mutation must surface to the caller, so all fallible
//! operations return [`AppError`] and nothing is swallowed into logs only.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Sign-in or registration failed. Deliberately carries no detail so
    /// the UI cannot distinguish wrong-password from unknown-account
    /// (account-enumeration resistance).
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Client-side user deletion is refused by policy: the client is not a
    /// trusted execution context for identity-provider administration.
    #[error("User deletion requires a trusted backend and is disabled in this client")]
    UserDeletionDisabled,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Comment listener failed; distinct from send failures so the panel
    /// can show "could not load comments / check access rules".
    #[error("Could not load comments: {0}")]
    CommentLoad(String),

    /// Comment write failed; shown as "could not send comment".
    #[error("Could not send comment: {0}")]
    CommentSend(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error should be presented as a generic credentials
    /// failure near the login/registration form.
    pub fn is_credentials_error(&self) -> bool {
        matches!(self, AppError::InvalidCredentials)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
