//! Utility modules for the companion engine.

pub mod config;
pub mod converter;
pub mod errors;
