//! Error types shared across the companion engine.

use thiserror::Error;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API credential in the environment, `.env` or the secrets file.
    #[error(
        "No API key found: set {var} in the environment or a .env file, or add it to {secrets_path}"
    )]
    MissingApiKey { var: String, secrets_path: String },

    /// A configuration variable holds a value that cannot be used.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Errors from session-scoped operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A response comparison was requested before any extraction ran.
    #[error("No profile extracted yet; run an extraction first")]
    NoProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_names_both_sources() {
        let err = ConfigError::MissingApiKey {
            var: "GEMINI_API_KEY".into(),
            secrets_path: "secrets.toml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("secrets.toml"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            key: "PORT".into(),
            value: "http".into(),
        };
        assert_eq!(err.to_string(), "Invalid value for PORT: \"http\"");
    }
}
