//! # Companion
//!
//! Mines free-text chat logs for a structured user (or team) profile using a
//! JSON-constrained Gemini call, then conditions replies on that profile under
//! one of several fixed personas, side by side with an unconditioned reply.
//!
//! The pieces:
//!
//! - [`memory`] - profile extraction and shape normalization
//! - [`persona`] - persona catalog and system prompt construction
//! - [`session`] - session state and the before/after comparison
//! - [`llms`] - the model abstraction and the Gemini provider
//! - [`server`] - the JSON HTTP surface

pub mod llms;
pub mod memory;
pub mod persona;
pub mod server;
pub mod session;
pub mod utilities;

// Re-exports
pub use llms::base_llm::BaseLLM;
pub use llms::GeminiCompletion;
pub use memory::{ExtractionOutcome, MemoryExtractor, UserProfile};
pub use persona::{compose_prompt, PersonaCatalog, PersonalityEngine};
pub use session::{compare_responses, Session, TuringComparison};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
