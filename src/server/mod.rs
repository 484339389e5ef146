//! HTTP server: router assembly, middleware and startup.

mod api;
mod error;
mod html;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::{AppConfig, SessionConfig};
use crate::favorites::{FavoritesStore, JsonFileStorage};
use crate::generation::GeneratorFactory;
use crate::session::SessionStore;

/// Form and JSON bodies here are small.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Start the server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let generator = GeneratorFactory::create(&config.generation)?;

    let storage = Arc::new(JsonFileStorage::new(&config.favorites.path));
    let favorites = FavoritesStore::hydrate(storage).await;

    let sessions = SessionStore::new();
    spawn_session_cleanup(sessions.clone(), &config.sessions);

    let state = AppState {
        generator,
        favorites,
        sessions,
        config: Arc::clone(&config),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Build the full router over `state`.
pub fn build_router(state: AppState) -> Router {
    // A disabled timeout becomes a very long one so the layer stack keeps one type.
    let timeout_duration = if state.config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(state.config.resilience.request_timeout_secs)
    };

    Router::new()
        .merge(html::router())
        .nest("/api", api::router())
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(&state.config.server.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .with_state(state)
}

/// GET /health
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "generator": state.generator.provider_name(),
        "sessions": state.sessions.len(),
        "favorites": state.favorites.len().await,
    }))
}

/// Periodically drop idle sessions.
fn spawn_session_cleanup(sessions: SessionStore, config: &SessionConfig) {
    let idle_timeout = Duration::from_secs(config.idle_timeout_secs);
    let every = Duration::from_secs(config.cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                info!(
                    name: "sessions.expired",
                    removed,
                    remaining = sessions.len(),
                    "Expired idle sessions"
                );
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(name: "server.shutdown", "Shutdown signal received");
}
