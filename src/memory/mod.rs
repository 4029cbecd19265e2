//! Memory system: turning raw chat logs into a structured profile.
//!
//! - [`profile`] - The normalized [`UserProfile`] record
//! - [`extractor`] - JSON-mode extraction and shape normalization
//! - [`sample`] - Bundled sample transcript

pub mod extractor;
pub mod profile;
pub mod sample;

pub use extractor::{
    ExtractionError, ExtractionOutcome, MemoryExtractor, RawExtraction, EXTRACTION_PROMPT,
};
pub use profile::{UserProfile, PROFILE_KEYS};
pub use sample::{SAMPLE_TRANSCRIPT, SAMPLE_USER_MESSAGE};
