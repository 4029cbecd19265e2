//! HTTP server exposing extraction and persona responses.
//!
//! # Endpoints
//!
//! - `GET  /health`  : Liveness probe
//! - `GET  /personas`: Persona catalog
//! - `POST /extract` : Chat logs to profile
//! - `POST /respond` : Before/after responses for a persona

pub mod routes;

pub use routes::{app_router, AppState};
