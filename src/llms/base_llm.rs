//! Base LLM trait for the companion engine.
//!
//! Provides the abstract interface every generative-model backend implements,
//! plus the shared message, response-format and error types. The engine only
//! ever needs "send prompt text, read back response text", optionally with the
//! response constrained to JSON.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while calling an external language-model service.
#[derive(Debug, Error)]
pub enum LLMError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("LLM API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The service answered with an explicit error payload.
    #[error("LLM API error: {0}")]
    Api(String),

    /// The response body was not in the expected format.
    #[error("Failed to parse LLM response: {0}")]
    Decode(String),

    /// The response contained no usable candidate text.
    #[error("Empty LLM response: {0}")]
    Empty(String),
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Output format requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A JSON document (`application/json` response MIME type).
    Json,
}

impl ResponseFormat {
    /// MIME type to request, if the format constrains one.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Json => Some("application/json"),
        }
    }
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// Abstract base trait for LLM implementations.
///
/// Implementors only provide [`complete`](BaseLLM::complete); the single-prompt
/// helpers used by the extractor and the response comparison are derived from
/// it. Implementations should map transport, status and decoding failures to
/// [`LLMError`] rather than panicking.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Get the model identifier/name.
    fn model(&self) -> &str;

    /// Get the provider name.
    fn provider(&self) -> &str;

    /// Send a conversation and return the concatenated response text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, LLMError>;

    /// Send a single user prompt and return free text.
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        self.complete(&[ChatMessage::user(prompt)], ResponseFormat::Text)
            .await
    }

    /// Send a single user prompt with the response constrained to JSON.
    async fn generate_json(&self, prompt: &str) -> Result<String, LLMError> {
        self.complete(&[ChatMessage::user(prompt)], ResponseFormat::Json)
            .await
    }
}
