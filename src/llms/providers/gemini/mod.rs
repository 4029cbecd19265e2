//! Google Gemini native completion provider.
//!
//! Talks to the Gemini `generateContent` REST endpoint directly over
//! `reqwest`. Supports system instructions, JSON-constrained output via
//! `responseMimeType`, and token usage logging.
//!
//! # Authentication
//!
//! The API key is sent as the `key` query parameter. Resolving the key is the
//! caller's job (see [`crate::utilities::config::AppConfig`]).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::llms::base_llm::{BaseLLM, ChatMessage, LLMError, ResponseFormat};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default model used for both extraction and chat generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Upper bound on how much of an error body is echoed back in errors.
const ERROR_BODY_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// GeminiCompletion provider
// ---------------------------------------------------------------------------

/// Google Gemini completion implementation.
///
/// # Example
///
/// ```ignore
/// let provider = GeminiCompletion::new("gemini-2.5-flash", api_key)?;
/// let text = provider.generate("Say hello").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GeminiCompletion {
    model: String,
    api_key: String,
    base_url: String,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Maximum output tokens.
    pub max_output_tokens: Option<u32>,
    client: reqwest::Client,
}

impl GeminiCompletion {
    /// Create a new Gemini provider with the default timeout.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LLMError> {
        Self::with_timeout(model, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new Gemini provider with an explicit request timeout.
    pub fn with_timeout(
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LLMError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            max_output_tokens: None,
            client,
        })
    }

    /// Point the provider at a different host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Get the API endpoint URL.
    fn api_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build generation config for the Gemini API.
    pub fn generation_config(&self, format: ResponseFormat) -> Value {
        let mut config = Map::new();
        if let Some(temp) = self.temperature {
            config.insert("temperature".to_string(), json!(temp));
        }
        if let Some(max_tokens) = self.max_output_tokens {
            config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(mime) = format.mime_type() {
            config.insert("responseMimeType".to_string(), json!(mime));
        }
        Value::Object(config)
    }

    /// Convert chat messages to Gemini `contents`.
    ///
    /// System messages are lifted into the separate system instruction.
    fn format_messages(messages: &[ChatMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts: Vec<&str> = Vec::new();
        let mut contents: Vec<Value> = Vec::new();

        for msg in messages {
            if msg.role == "system" {
                system_parts.push(&msg.content);
                continue;
            }
            let role = match msg.role.as_str() {
                "assistant" => "model",
                _ => "user",
            };
            contents.push(json!({
                "role": role,
                "parts": [{ "text": msg.content }],
            }));
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };
        (system, contents)
    }

    /// Build the complete request body.
    pub fn build_request_body(&self, messages: &[ChatMessage], format: ResponseFormat) -> Value {
        let (system, contents) = Self::format_messages(messages);

        let mut body = json!({
            "contents": contents,
            "generationConfig": self.generation_config(format),
        });
        if let Some(system_text) = system {
            body["systemInstruction"] = json!({
                "parts": [{ "text": system_text }]
            });
        }
        body
    }

    /// Parse a Gemini API response into the concatenated candidate text.
    pub fn parse_response(response: &Value) -> Result<String, LLMError> {
        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown Gemini API error");
            return Err(LLMError::Api(msg.to_string()));
        }

        let candidates = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .ok_or_else(|| LLMError::Decode("no candidates in Gemini response".into()))?;

        let candidate = candidates
            .first()
            .ok_or_else(|| LLMError::Empty("empty candidates array in Gemini response".into()))?;

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                let reason = candidate
                    .get("finishReason")
                    .and_then(|r| r.as_str())
                    .unwrap_or("unknown");
                LLMError::Empty(format!("candidate has no content (finishReason: {reason})"))
            })?;

        Ok(parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(""))
    }

    fn log_token_usage(&self, response: &Value) {
        if let Some(usage) = response.get("usageMetadata") {
            let prompt = usage
                .get("promptTokenCount")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            let completion = usage
                .get("candidatesTokenCount")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            log::debug!(
                "Gemini usage: model={}, prompt_tokens={}, completion_tokens={}, total_tokens={}",
                self.model,
                prompt,
                completion,
                prompt + completion,
            );
        }
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl BaseLLM for GeminiCompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, LLMError> {
        log::debug!(
            "GeminiCompletion.complete: model={}, messages={}, format={:?}",
            self.model,
            messages.len(),
            format,
        );

        let body = self.build_request_body(messages, format);
        let response = self
            .client
            .post(self.api_endpoint())
            .header("content-type", "application/json")
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| truncate(&response_text, ERROR_BODY_LIMIT).to_string());
            return Err(LLMError::Status {
                status: status.as_u16(),
                body: message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            LLMError::Decode(format!(
                "{} - Body: {}",
                e,
                truncate(&response_text, ERROR_BODY_LIMIT)
            ))
        })?;

        self.log_token_usage(&response_json);
        Self::parse_response(&response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiCompletion {
        GeminiCompletion::new(DEFAULT_MODEL, "test-key").unwrap()
    }

    #[test]
    fn test_endpoint_uses_model_and_base_url() {
        let p = provider().with_base_url("http://localhost:9999/");
        assert_eq!(
            p.api_endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_generation_config_json_mode() {
        let p = provider().with_temperature(0.2).with_max_output_tokens(256);
        let config = p.generation_config(ResponseFormat::Json);
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["temperature"], 0.2);
        assert_eq!(config["maxOutputTokens"], 256);

        let text = provider().generation_config(ResponseFormat::Text);
        assert!(text.get("responseMimeType").is_none());
    }

    #[test]
    fn test_request_body_lifts_system_messages() {
        let messages = vec![
            ChatMessage::system("be nice"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let body = provider().build_request_body(&messages, ResponseFormat::Text);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be nice");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_request_body_without_system_message() {
        let body = provider().build_request_body(&[ChatMessage::user("x")], ResponseFormat::Json);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_parse_response_joins_text_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        });
        assert_eq!(
            GeminiCompletion::parse_response(&response).unwrap(),
            "Hello, world"
        );
    }

    #[test]
    fn test_parse_response_errors() {
        let api_error = json!({ "error": { "message": "API key not valid" } });
        assert!(matches!(
            GeminiCompletion::parse_response(&api_error),
            Err(LLMError::Api(msg)) if msg == "API key not valid"
        ));

        let empty = json!({ "candidates": [] });
        assert!(matches!(
            GeminiCompletion::parse_response(&empty),
            Err(LLMError::Empty(_))
        ));

        let blocked = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        match GeminiCompletion::parse_response(&blocked) {
            Err(LLMError::Empty(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(
            GeminiCompletion::parse_response(&json!({})),
            Err(LLMError::Decode(_))
        ));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
