// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity Toolkit client for email/password authentication.
//!
//! Handles:
//! - Credential creation (registration and coordinator provisioning)
//! - Sign-in / sign-out
//! - The identity-change stream consumed by the session store
//!
//! Credential failures collapse into [`AppError::InvalidCredentials`]
//! regardless of cause, so callers cannot distinguish wrong-password from
//! unknown-account (account-enumeration resistance).

use serde::Deserialize;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::{AppError, Result};

/// The authenticated identity as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthIdentity {
    /// Provider-assigned uid
    pub uid: String,
    pub email: String,
}

/// Successful sign-up/sign-in response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    email: String,
}

/// Identity Toolkit API client.
///
/// Owns the identity-change stream: sign-in and sign-out publish into a
/// `watch` channel that the session store consumes.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    identity_tx: watch::Sender<Option<AuthIdentity>>,
}

impl IdentityClient {
    /// Create a new client from configuration.
    ///
    /// For local development with the Auth emulator, set
    /// FIREBASE_AUTH_EMULATOR_HOST.
    pub fn new(config: &Config) -> Self {
        let base_url = match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => {
                tracing::info!(host = %host, "Using Auth emulator");
                format!("http://{}/identitytoolkit.googleapis.com/v1", host)
            }
            Err(_) => "https://identitytoolkit.googleapis.com/v1".to_string(),
        };
        Self::with_base_url(base_url, config.api_key.clone())
    }

    /// Create a client against an explicit endpoint (tests).
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let (identity_tx, _) = watch::channel(None);
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            identity_tx,
        }
    }

    /// Subscribe to identity changes. The current value is delivered
    /// immediately; `None` means no authenticated identity.
    pub fn identity_stream(&self) -> watch::Receiver<Option<AuthIdentity>> {
        self.identity_tx.subscribe()
    }

    /// Current identity, if any.
    pub fn current_identity(&self) -> Option<AuthIdentity> {
        self.identity_tx.borrow().clone()
    }

    /// Create a credential and sign the new account in on this (primary)
    /// context. Used by first-user registration.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let identity = self.credential_call("accounts:signUp", email, password).await?;
        tracing::info!(uid = %identity.uid, "Account created and signed in");
        self.identity_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Exchange email/password for a session on this (primary) context.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let identity = self
            .credential_call("accounts:signInWithPassword", email, password)
            .await?;
        tracing::info!(uid = %identity.uid, "Signed in");
        self.identity_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Publish an identity restored from outside the sign-in flow (e.g.
    /// a credential the hosting platform persisted across restarts).
    pub fn resume_session(&self, identity: AuthIdentity) {
        tracing::info!(uid = %identity.uid, "Resuming persisted session");
        self.identity_tx.send_replace(Some(identity));
    }

    /// Tear down the authenticated session. The identity stream reverts
    /// to "no identity".
    pub fn sign_out(&self) {
        if self.identity_tx.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    /// Create a credential on a secondary, isolated context.
    ///
    /// The acting coordinator's own session is untouched: nothing is
    /// published to the identity stream, and the ephemeral session created
    /// by the provider is discarded immediately.
    pub async fn provision_credential(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let identity = self.credential_call("accounts:signUp", email, password).await?;
        tracing::info!(uid = %identity.uid, "Credential provisioned on secondary context");
        Ok(identity)
    }

    /// POST a credential operation and map failures to the generic
    /// credentials error.
    async fn credential_call(
        &self,
        operation: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity> {
        let url = format!("{}/{}?key={}", self.base_url, operation, self.api_key);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Identity request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let auth: AuthResponse = response
                .json()
                .await
                .map_err(|e| AppError::Identity(format!("Malformed identity response: {}", e)))?;
            return Ok(AuthIdentity {
                uid: auth.local_id,
                email: auth.email,
            });
        }

        // The provider reports the precise cause (EMAIL_EXISTS,
        // EMAIL_NOT_FOUND, INVALID_PASSWORD, ...). Log it, surface the
        // generic error.
        let detail = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            tracing::warn!(operation, status = %status, detail = %detail, "Credential operation rejected");
            return Err(AppError::InvalidCredentials);
        }

        tracing::error!(operation, status = %status, detail = %detail, "Identity provider error");
        Err(AppError::Identity(format!(
            "Identity provider returned {}",
            status
        )))
    }
}
