pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::drafting::handlers::handle_draft_statement;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis", post(handlers::handle_analyze))
        .route(
            "/api/v1/analysis/upload",
            post(handlers::handle_analyze_upload),
        )
        .route("/api/v1/vocabulary", get(handlers::handle_get_vocabulary))
        // Drafting API
        .route("/api/v1/statements/draft", post(handle_draft_statement))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
