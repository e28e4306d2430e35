// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Built once at startup and shared through `AppState`; nothing below the
//! router re-reads the environment.

use serde::Serialize;
use std::env;
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Which persistence backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Persistence backend
    pub storage_backend: StorageBackend,
    /// Upstream text-generation endpoint
    pub generation_api_url: String,
    /// Timeout applied to every generation request
    pub generation_timeout: Duration,
    /// HS256 key the identity provider signs session tokens with (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// UI palette, served to every page from one place
    pub theme: Theme,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .trim()
        {
            "firestore" => StorageBackend::Firestore,
            "memory" => StorageBackend::Memory,
            other => return Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string())),
        };

        let generation_timeout_secs = match env::var("GENERATION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("GENERATION_TIMEOUT_SECS", raw))?,
            Err(_) => DEFAULT_GENERATION_TIMEOUT_SECS,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            storage_backend,
            generation_api_url: env::var("GENERATION_API_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GENERATION_API_URL"))?,
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
            theme: Theme::default(),
        })
    }

    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage_backend: StorageBackend::Memory,
            generation_api_url: "http://127.0.0.1:9/generate".to_string(),
            generation_timeout: Duration::from_secs(5),
            session_signing_key: b"test_session_key_32_bytes_long!!".to_vec(),
            theme: Theme::default(),
        }
    }
}

/// Color palette shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub paper: String,
    pub card: String,
    pub text_primary: String,
    pub text_secondary: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#FF5722".to_string(),
            secondary: "#E0E0E0".to_string(),
            background: "#000000".to_string(),
            paper: "#1F1F1F".to_string(),
            card: "#2C2C2C".to_string(),
            text_primary: "#FFFFFF".to_string(),
            text_secondary: "#B0B0B0".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        env::set_var("GENERATION_API_URL", " http://localhost:9999/api/generate ");
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_long!!");
        env::set_var("STORAGE_BACKEND", "memory");
        env::remove_var("GENERATION_TIMEOUT_SECS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.generation_api_url, "http://localhost:9999/api/generate");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.theme.primary, "#FF5722");

        env::set_var("STORAGE_BACKEND", "postgres");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("STORAGE_BACKEND", _)));

        env::remove_var("STORAGE_BACKEND");
    }
}
