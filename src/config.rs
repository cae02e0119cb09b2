// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The backend connection parameters and the tenant identifier are read
//! once at startup and are immutable for the process lifetime.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase/GCP project ID (the Firestore database to connect to)
    pub project_id: String,
    /// Identity Toolkit web API key (public)
    pub api_key: String,
    /// App/tenant identifier recorded by the hosting platform
    pub app_id: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            project_id: "test-project".to_string(),
            api_key: "test_api_key".to_string(),
            app_id: "test-app".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file if present (local development).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            project_id: env::var("FIREBASE_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
            api_key: env::var("FIREBASE_API_KEY")
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            app_id: env::var("FIREBASE_APP_ID").unwrap_or_else(|_| "local-dev".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FIREBASE_PROJECT_ID", "test-project");
        env::set_var("FIREBASE_API_KEY", "test_key");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.project_id, "test-project");
        assert_eq!(config.api_key, "test_key");
    }
}
