mod analysis;
mod config;
mod documents;
mod drafting;
mod errors;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::vocabulary::DomainVocabulary;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting statement API v{}", env!("CARGO_PKG_VERSION"));

    // Domain vocabulary: built-in defaults unless VOCABULARY_PATH points at a JSON file
    let vocabulary = match &config.vocabulary_path {
        Some(path) => {
            let vocabulary = DomainVocabulary::from_json_file(path)?;
            info!("Vocabulary loaded from {}", path.display());
            vocabulary
        }
        None => DomainVocabulary::default(),
    };

    let state = AppState::heuristic(config.clone(), vocabulary);
    info!(
        "Analyzer: {} (max document chars: {})",
        state.analyzer.backend(),
        config.max_document_chars
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
