//! Runtime configuration and credential resolution.
//!
//! The API key is looked up in the process environment first (after loading
//! a `.env` file, if any), then in a TOML secrets file. Everything else has a
//! default.

use std::path::{Path, PathBuf};

use crate::llms::providers::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::utilities::errors::ConfigError;

/// Environment variable / secrets key holding the Gemini credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Overrides the secrets file location.
pub const SECRETS_FILE_VAR: &str = "COMPANION_SECRETS_FILE";
/// Secrets file consulted when the key is not in the environment.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from `.env`, the environment and the secrets file.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secrets_path = non_empty(SECRETS_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_FILE));

        let api_key = match non_empty(API_KEY_VAR) {
            Some(key) => key,
            None => read_secret(&secrets_path, API_KEY_VAR).ok_or_else(|| {
                ConfigError::MissingApiKey {
                    var: API_KEY_VAR.to_string(),
                    secrets_path: secrets_path.display().to_string(),
                }
            })?,
        };

        let port = match non_empty(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: PORT_VAR.to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port,
        })
    }
}

/// Read a string key from a TOML secrets file.
///
/// A missing, unreadable or malformed file counts as "no secret"; only the
/// latter two are logged.
pub fn read_secret(path: &Path, key: &str) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Cannot read secrets file {}: {}", path.display(), e);
            return None;
        }
    };
    let table: toml::Table = match raw.parse() {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Ignoring malformed secrets file {}: {}", path.display(), e);
            return None;
        }
    };
    table
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
