//! Profile extraction from raw chat logs.
//!
//! The extractor asks the model for a single JSON object with three list
//! keys, then normalizes whatever shape actually comes back. Extraction
//! never fails outward: every failure degrades to an empty profile plus an
//! error description for the caller to display.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::llms::base_llm::{BaseLLM, LLMError};
use crate::memory::profile::{UserProfile, PROFILE_KEYS};
use crate::utilities::converter::{json_kind, validate_model, ConverterError};

/// Instruction sent ahead of the chat logs.
pub const EXTRACTION_PROMPT: &str = concat!(
    "You are an expert Data Scientist. Analyze the logs. ",
    "If the chat involves multiple people, extract a 'Team Context' profile. ",
    "1. 'preferences': Work styles or specific dislikes of the team members. ",
    "2. 'emotional_patterns': The overall mood (e.g., 'Team is stressed about deployment'). ",
    "3. 'facts': Hard data about the incident, names, and roles. ",
    "Return a SINGLE JSON object matching this schema: ",
    "{'preferences': [], 'emotional_patterns': [], 'facts': []}."
);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an extraction degraded to an empty profile.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction Error: {0}")]
    Service(#[from] LLMError),

    #[error("Extraction Error: {0}")]
    Converter(#[from] ConverterError),
}

// ---------------------------------------------------------------------------
// Raw shapes
// ---------------------------------------------------------------------------

/// Shape of the model's reply at the parse boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawExtraction {
    /// The requested single JSON object.
    SingleObject(Map<String, Value>),
    /// A JSON array, typically one object per participant.
    ArrayOfObjects(Vec<Value>),
    /// Not JSON, or JSON that is neither an object nor an array.
    Malformed(String),
}

impl RawExtraction {
    /// Classify raw model output. Parsing is strict: no JSON is fished out
    /// of surrounding prose.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self::SingleObject(map),
            Ok(Value::Array(items)) => Self::ArrayOfObjects(items),
            Ok(other) => Self::Malformed(format!(
                "expected a JSON object or array, got {}",
                json_kind(&other)
            )),
            Err(e) => Self::Malformed(format!("JSON parse error: {}", e)),
        }
    }

    /// Map any shape to a validated profile.
    ///
    /// Arrays contribute their first element; an empty array is an empty
    /// profile, not an error. Missing keys default to empty lists, present
    /// keys are kept as-is and must hold arrays of strings.
    pub fn normalize(self) -> Result<UserProfile, ConverterError> {
        let mut object = match self {
            Self::SingleObject(map) => map,
            Self::ArrayOfObjects(items) => match items.into_iter().next() {
                None => Map::new(),
                Some(Value::Object(map)) => map,
                Some(other) => {
                    return Err(ConverterError::Validation(format!(
                        "first array element must be an object, got {}",
                        json_kind(&other)
                    )))
                }
            },
            Self::Malformed(reason) => return Err(ConverterError::Malformed(reason)),
        };

        for key in PROFILE_KEYS {
            object
                .entry(key.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
        }

        validate_model(Value::Object(object))
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one extraction: always a profile, plus what went wrong, if
/// anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionOutcome {
    pub profile: UserProfile,
    /// User-facing description of the failure.
    pub error: Option<String>,
    /// The model output that caused the failure, when there was one.
    pub raw_output: Option<String>,
}

impl ExtractionOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ---------------------------------------------------------------------------
// MemoryExtractor
// ---------------------------------------------------------------------------

/// Mines chat logs for a [`UserProfile`] via a JSON-mode model call.
#[derive(Debug, Clone)]
pub struct MemoryExtractor {
    llm: Arc<dyn BaseLLM>,
}

impl MemoryExtractor {
    pub fn new(llm: Arc<dyn BaseLLM>) -> Self {
        Self { llm }
    }

    /// Full request text for the given logs.
    pub fn build_request(chat_logs: &str) -> String {
        format!("{}\n\nCHAT LOGS:\n{}", EXTRACTION_PROMPT, chat_logs)
    }

    /// Extract a profile. Never fails; see [`ExtractionOutcome`].
    pub async fn extract_memory(&self, chat_logs: &str) -> ExtractionOutcome {
        log::info!(
            "Extracting memory with {} ({} bytes of logs)",
            self.llm.model(),
            chat_logs.len()
        );

        let raw = match self.llm.generate_json(&Self::build_request(chat_logs)).await {
            Ok(raw) => raw,
            Err(e) => return degrade(e.into(), None),
        };

        match RawExtraction::parse(&raw).normalize() {
            Ok(profile) => {
                log::info!(
                    "Extraction complete: {} facts, {} preferences, {} emotional patterns",
                    profile.facts.len(),
                    profile.preferences.len(),
                    profile.emotional_patterns.len()
                );
                ExtractionOutcome {
                    profile,
                    error: None,
                    raw_output: None,
                }
            }
            Err(e) => degrade(e.into(), Some(raw)),
        }
    }
}

fn degrade(error: ExtractionError, raw_output: Option<String>) -> ExtractionOutcome {
    log::error!("{}", error);
    log::warn!(
        "Raw output causing error: {}",
        raw_output.as_deref().unwrap_or("None")
    );
    ExtractionOutcome {
        profile: UserProfile::default(),
        error: Some(error.to_string()),
        raw_output,
    }
}
