use std::sync::Arc;

use crate::analysis::orchestrator::{AnalysisEngine, Analyzer, HeuristicAnalyzer};
use crate::analysis::vocabulary::DomainVocabulary;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: HeuristicAnalyzer.
    pub analyzer: Arc<dyn Analyzer>,
    /// Active keyword lists, shared with the analyzer.
    pub vocabulary: Arc<DomainVocabulary>,
}

impl AppState {
    /// State backed by the heuristic analyzer over `vocabulary`.
    pub fn heuristic(config: Config, vocabulary: DomainVocabulary) -> Self {
        let vocabulary = Arc::new(vocabulary);
        let mut engine = AnalysisEngine::new(Arc::clone(&vocabulary))
            .with_max_document_chars(config.max_document_chars);
        if let Some(year) = config.reference_year {
            engine = engine.with_reference_year(year);
        }
        Self {
            config,
            analyzer: Arc::new(HeuristicAnalyzer::new(engine)),
            vocabulary,
        }
    }
}
