//! LLM system for the companion engine.
//!
//! - [`base_llm`] - The abstract base trait plus message and error types
//! - [`providers`] - Native provider implementations (Gemini)

pub mod base_llm;
pub mod providers;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use base_llm::{BaseLLM, ChatMessage, LLMError, ResponseFormat};
pub use providers::gemini::GeminiCompletion;
