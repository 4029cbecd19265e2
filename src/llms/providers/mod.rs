//! LLM provider implementations.
//!
//! Each provider implements the [`BaseLLM`](crate::llms::base_llm::BaseLLM)
//! trait and handles authentication, request formatting and error mapping
//! specific to that provider.
//!
//! # Available Providers
//!
//! | Provider | Module |
//! |----------|--------|
//! | Gemini | [`gemini`] |

pub mod gemini;
