//! Persona system: fixed response styles conditioned on an extracted profile.
//!
//! # Architecture
//!
//! ```text
//! PersonaCatalog (name -> instruction, first entry is the default)
//!   ↓  resolve(name)
//! PersonalityEngine { profile }
//!   ↓  instruction + "\n\n" + dossier
//! system prompt string
//! ```

pub mod catalog;
pub mod engine;

// Re-exports
pub use catalog::{Persona, PersonaCatalog};
pub use engine::{compose_prompt, render_dossier, PersonalityEngine};
