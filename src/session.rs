//! Session state and the before/after response comparison.
//!
//! A [`Session`] holds the one profile produced by the latest extraction. It
//! is created empty, filled by [`Session::store_extraction`], read when
//! composing prompts, and dropped (or [`Session::clear`]ed) at session end.

use std::sync::Arc;

use serde::Serialize;

use crate::llms::base_llm::BaseLLM;
use crate::memory::extractor::{ExtractionOutcome, MemoryExtractor};
use crate::memory::profile::UserProfile;
use crate::persona::catalog::PersonaCatalog;
use crate::persona::engine::PersonalityEngine;
use crate::utilities::errors::SessionError;

/// In-memory state for one interactive session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    profile: Option<UserProfile>,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held profile with the outcome's profile.
    ///
    /// A degraded extraction still stores its (empty) profile, matching what
    /// the user was shown.
    pub fn store_extraction(&mut self, outcome: &ExtractionOutcome) {
        self.profile = Some(outcome.profile.clone());
        self.last_error = outcome.error.clone();
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Error of the latest extraction, if it degraded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn require_profile(&self) -> Result<&UserProfile, SessionError> {
        self.profile.as_ref().ok_or(SessionError::NoProfile)
    }

    /// Run an extraction and keep its profile.
    pub async fn extract(&mut self, llm: Arc<dyn BaseLLM>, chat_logs: &str) -> ExtractionOutcome {
        let outcome = MemoryExtractor::new(llm).extract_memory(chat_logs).await;
        self.store_extraction(&outcome);
        outcome
    }

    /// Before/after comparison against the held profile.
    pub async fn compare(
        &self,
        llm: &dyn BaseLLM,
        persona_name: &str,
        user_input: &str,
    ) -> Result<TuringComparison, SessionError> {
        let profile = self.require_profile()?;
        Ok(compare_responses(llm, persona_name, profile, user_input).await)
    }

    /// Discard the held profile.
    pub fn clear(&mut self) {
        self.profile = None;
        self.last_error = None;
    }
}

// ---------------------------------------------------------------------------
// Before/after comparison
// ---------------------------------------------------------------------------

/// Outcome of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseOutcome {
    Ok { text: String },
    Failed { error: String },
}

impl ResponseOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ok { text } => Some(text),
            Self::Failed { .. } => None,
        }
    }
}

/// Unconditioned vs persona-conditioned reply to the same user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TuringComparison {
    /// Persona actually used, after default substitution.
    pub persona: String,
    pub user_input: String,
    pub generic: ResponseOutcome,
    pub personalized: ResponseOutcome,
}

/// Prompt for the unconditioned reply.
pub fn generic_prompt(user_input: &str) -> String {
    format!("User said: {}. Respond helpfully.", user_input)
}

/// Prompt for the persona-conditioned reply.
pub fn personalized_prompt(system_prompt: &str, user_input: &str) -> String {
    format!("{}\n\nUSER INPUT: {}", system_prompt, user_input)
}

async fn run(llm: &dyn BaseLLM, prompt: &str, side: &str) -> ResponseOutcome {
    match llm.generate(prompt).await {
        Ok(text) => ResponseOutcome::Ok { text },
        Err(e) => {
            log::error!("{} response generation failed: {}", side, e);
            ResponseOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Generate the generic reply, then the persona reply, one after the other.
///
/// Each side's failure is reported in its own [`ResponseOutcome`] so one
/// failing call does not hide the other's result.
pub async fn compare_responses(
    llm: &dyn BaseLLM,
    persona_name: &str,
    profile: &UserProfile,
    user_input: &str,
) -> TuringComparison {
    let persona = PersonaCatalog::builtin().resolve(persona_name);
    let system_prompt = PersonalityEngine::new(profile).construct_system_prompt(persona.name);

    let generic = run(llm, &generic_prompt(user_input), "Generic").await;
    let personalized = run(
        llm,
        &personalized_prompt(&system_prompt, user_input),
        persona.name,
    )
    .await;

    TuringComparison {
        persona: persona.name.to_string(),
        user_input: user_input.to_string(),
        generic,
        personalized,
    }
}
