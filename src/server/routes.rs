//! Axum route handlers for the companion HTTP server.
//!
//! # Routes
//!
//! - `GET /health`: Returns `{"status": "ok", "version": ..., "service": ...}`
//! - `GET /personas`: Persona names in catalog order plus the default
//! - `GET /sample`: The bundled sample transcript
//! - `POST /extract`: Extract a profile from `{ "transcript": ... }`
//! - `GET /profile`: The profile held by the session
//! - `DELETE /profile`: Discard the session profile
//! - `POST /respond`: Generic vs persona reply to `{ "persona", "message" }`

use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::llms::base_llm::BaseLLM;
use crate::memory::extractor::{ExtractionOutcome, MemoryExtractor};
use crate::memory::sample::{SAMPLE_TRANSCRIPT, SAMPLE_USER_MESSAGE};
use crate::persona::catalog::PersonaCatalog;
use crate::session::{compare_responses, Session, TuringComparison};
use crate::utilities::errors::SessionError;

type ApiError = (StatusCode, Json<Value>);

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Model used for extraction and both chat generations.
    pub llm: Arc<dyn BaseLLM>,
    /// The single in-memory session.
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn BaseLLM>) -> Self {
        Self {
            llm,
            session: Arc::new(RwLock::new(Session::new())),
        }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/personas", get(personas_handler))
        .route("/sample", get(sample_handler))
        .route("/extract", post(extract_handler))
        .route("/profile", get(get_profile_handler).delete(clear_profile_handler))
        .route("/respond", post(respond_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn lock_poisoned() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Session lock poisoned"})),
    )
}

/// GET /health: liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "companion",
    }))
}

/// GET /personas: selectable persona names.
async fn personas_handler() -> impl IntoResponse {
    let catalog = PersonaCatalog::builtin();
    Json(json!({
        "personas": catalog.names(),
        "default": catalog.default_persona().name,
    }))
}

/// GET /sample: default extraction input.
async fn sample_handler() -> impl IntoResponse {
    Json(json!({
        "transcript": SAMPLE_TRANSCRIPT,
        "message": SAMPLE_USER_MESSAGE,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    /// Raw chat logs; the sample transcript when absent.
    #[serde(default)]
    pub transcript: Option<String>,
}

/// POST /extract: mine the transcript and store the profile in the session.
///
/// Always 200: a degraded extraction carries its error in the body.
async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionOutcome>, ApiError> {
    let transcript = request
        .transcript
        .unwrap_or_else(|| SAMPLE_TRANSCRIPT.to_string());

    let outcome = MemoryExtractor::new(state.llm.clone())
        .extract_memory(&transcript)
        .await;

    match &outcome.error {
        Some(error) => tracing::warn!(%error, "extraction degraded to an empty profile"),
        None => tracing::info!(
            facts = outcome.profile.facts.len(),
            preferences = outcome.profile.preferences.len(),
            emotional_patterns = outcome.profile.emotional_patterns.len(),
            "extraction complete"
        ),
    }

    state
        .session
        .write()
        .map_err(|_| lock_poisoned())?
        .store_extraction(&outcome);

    Ok(Json(outcome))
}

/// GET /profile: the profile currently held by the session.
async fn get_profile_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let session = state.session.read().map_err(|_| lock_poisoned())?;
    match session.profile() {
        Some(profile) => Ok(Json(json!({
            "profile": profile,
            "last_error": session.last_error(),
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": SessionError::NoProfile.to_string()})),
        )),
    }
}

/// DELETE /profile: end of session.
async fn clear_profile_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.session.write().map_err(|_| lock_poisoned())?.clear();
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct RespondRequest {
    /// Persona name; the catalog default when absent or unknown.
    #[serde(default)]
    pub persona: Option<String>,
    /// The user's new message; the sample message when absent.
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /respond: generic vs persona-conditioned reply.
///
/// 409 until a profile has been extracted. Generation failures are reported
/// per side inside a 200 body.
async fn respond_handler(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<TuringComparison>, ApiError> {
    // Clone out so no lock is held across the model calls.
    let profile = state
        .session
        .read()
        .map_err(|_| lock_poisoned())?
        .require_profile()
        .cloned()
        .map_err(|e| (StatusCode::CONFLICT, Json(json!({"error": e.to_string()}))))?;

    let persona = request
        .persona
        .unwrap_or_else(|| PersonaCatalog::builtin().default_persona().name.to_string());
    let message = request
        .message
        .unwrap_or_else(|| SAMPLE_USER_MESSAGE.to_string());

    let comparison = compare_responses(state.llm.as_ref(), &persona, &profile, &message).await;
    tracing::info!(persona = %comparison.persona, "generated before/after responses");

    Ok(Json(comparison))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
