use axum::{
    extract::{multipart::Multipart, rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::models::{AnalysisInput, AnalysisResult};
use crate::analysis::progress::ProgressEvent;
use crate::analysis::vocabulary::DomainVocabulary;
use crate::documents::decode_upload;
use crate::errors::AppError;
use crate::state::AppState;

/// A candidate's explanation for a requirement the profile does not cover.
#[derive(Debug, Clone, Deserialize)]
pub struct GapJustification {
    pub requirement: String,
    pub justification: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub profile_text: String,
    pub posting_text: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub gap_justifications: Vec<GapJustification>,
}

impl AnalyzeRequest {
    /// Additional info and every non-empty justification become the addenda,
    /// one per line.
    pub fn into_input(self) -> AnalysisInput {
        let mut addenda: Vec<String> = Vec::new();
        if let Some(info) = self.additional_info.as_deref().map(str::trim) {
            if !info.is_empty() {
                addenda.push(info.to_string());
            }
        }
        for gap in &self.gap_justifications {
            let justification = gap.justification.trim();
            if !justification.is_empty() {
                addenda.push(format!("{}: {}", gap.requirement.trim(), justification));
            }
        }
        AnalysisInput::new(self.profile_text, self.posting_text).with_addenda(addenda.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
    pub progress: Vec<ProgressEvent>,
    pub analyzer: &'static str,
}

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    run_analysis(&state, req.into_input()).await
}

/// POST /api/v1/analysis/upload
///
/// Multipart fields: `profile` and `posting` (files), `additional_info` (text).
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut profile: Option<String> = None;
    let mut posting: Option<String> = None;
    let mut additional_info = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profile" | "posting" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.body_text()))?;
                let text = decode_upload(file_name, content_type, bytes).await?;
                if name == "profile" {
                    profile = Some(text);
                } else {
                    posting = Some(text);
                }
            }
            "additional_info" => {
                additional_info = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let profile = profile.ok_or_else(|| AppError::Validation("missing 'profile' file".into()))?;
    let posting = posting.ok_or_else(|| AppError::Validation("missing 'posting' file".into()))?;
    let input = AnalysisInput::new(profile, posting).with_addenda(additional_info.trim());
    run_analysis(&state, input).await
}

/// GET /api/v1/vocabulary
pub async fn handle_get_vocabulary(State(state): State<AppState>) -> Json<DomainVocabulary> {
    Json(state.vocabulary.as_ref().clone())
}

async fn run_analysis(state: &AppState, input: AnalysisInput) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut progress: Vec<ProgressEvent> = Vec::new();
    let mut record = |stage: &str, percent: u8| {
        progress.push(ProgressEvent {
            stage: stage.to_string(),
            percent,
        })
    };
    let result = state.analyzer.analyze(&input, Some(&mut record)).await?;

    Ok(Json(AnalyzeResponse {
        result,
        progress,
        analyzer: state.analyzer.backend(),
    }))
}
