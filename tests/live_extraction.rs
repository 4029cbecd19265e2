//! Live extraction against the real Gemini API.
//!
//! Ignored by default. Run with `GEMINI_API_KEY` set:
//!
//! ```bash
//! cargo test --test live_extraction -- --ignored
//! ```

use std::sync::Arc;

use companion::llms::GeminiCompletion;
use companion::memory::{MemoryExtractor, SAMPLE_TRANSCRIPT};
use companion::utilities::config::AppConfig;

#[tokio::test]
#[ignore = "calls the hosted Gemini API"]
async fn test_sample_transcript_yields_names_and_stress() {
    let config = AppConfig::from_env().expect("GEMINI_API_KEY must be configured");
    let llm = GeminiCompletion::new(&config.model, &config.api_key)
        .unwrap()
        .with_base_url(&config.base_url);

    let outcome = MemoryExtractor::new(Arc::new(llm))
        .extract_memory(SAMPLE_TRANSCRIPT)
        .await;

    assert!(outcome.error.is_none(), "extraction failed: {:?}", outcome.error);
    let profile = outcome.profile;
    assert!(!profile.facts.is_empty());
    assert!(!profile.emotional_patterns.is_empty());
    assert!(profile.facts.iter().any(|f| f.contains("Sarah")));
    assert!(profile.emotional_patterns.iter().any(|p| {
        let lower = p.to_lowercase();
        ["stress", "urgen", "panic", "pressure", "tense", "anxi"]
            .iter()
            .any(|needle| lower.contains(needle))
    }));
}
