// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local display preferences.
//!
//! A single boolean (dark/light mode) persisted under the platform config
//! directory, read once at startup and written on toggle. Nothing else
//! lives here; all application state is remote.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const PREFS_FILE: &str = "prefs.json";

/// Persisted display preferences.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Loads and stores [`Preferences`] in the platform config directory.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store under the platform config directory for this application.
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "taysync")
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("No home directory available")))?;
        Ok(Self {
            path: dirs.config_dir().join(PREFS_FILE),
        })
    }

    /// Store at an explicit path (tests).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(&self) -> Preferences {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Corrupt preferences file, using defaults");
                Preferences::default()
            }),
            Err(_) => Preferences::default(),
        }
    }

    /// Persist preferences, creating the config directory if needed.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Create config dir: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize preferences: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Write preferences: {}", e)))?;
        Ok(())
    }

    /// Flip dark mode and persist, returning the new value.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let mut prefs = self.load();
        prefs.dark_mode = !prefs.dark_mode;
        self.save(&prefs)?;
        Ok(prefs.dark_mode)
    }
}
