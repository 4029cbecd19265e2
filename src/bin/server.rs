//! companion HTTP server binary.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: API credential (or in `secrets.toml`, see `COMPANION_SECRETS_FILE`)
//! - `GEMINI_MODEL`: Model name (default: gemini-2.5-flash)
//! - `GEMINI_BASE_URL`: API host override
//! - `PORT`: HTTP port (default: 8080)
//! - `RUST_LOG`: Tracing filter (default: "info,companion=debug")
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use companion::llms::GeminiCompletion;
use companion::server::{app_router, AppState};
use companion::utilities::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,companion=debug".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let llm = GeminiCompletion::new(&config.model, &config.api_key)
        .context("Failed to build Gemini client")?
        .with_base_url(&config.base_url);
    tracing::info!(model = %config.model, "Gemini client configured");

    let app = app_router(AppState::new(Arc::new(llm)));
    let bind_addr = format!("0.0.0.0:{}", config.port);

    tracing::info!("companion server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health  : liveness probe");
    tracing::info!("  GET  /personas: persona catalog");
    tracing::info!("  POST /extract : chat logs to profile");
    tracing::info!("  POST /respond : before/after responses");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
