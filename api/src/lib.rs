//! HTTP surface over the review session.

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::{env, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        detect::detect_route::detect_route,
        languages::languages_route::languages_route,
        review::review_route::{refactored_code_route, review_report_route, submit_review_route},
        session::session_route::{edit_code_route, get_session_route, select_language_route},
    },
};

/// Bind address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// Builds the application router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/languages", get(languages_route))
        .route("/detect", post(detect_route))
        .route("/session", get(get_session_route))
        .route("/session/code", put(edit_code_route))
        .route("/session/language", put(select_language_route))
        .route("/session/review", post(submit_review_route))
        .route("/session/review/report", get(review_report_route))
        .route("/session/review/refactored-code", get(refactored_code_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Loads state from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());
    let state = Arc::new(AppState::from_env()?);
    info!(model = state.client.model(), "review client ready");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
