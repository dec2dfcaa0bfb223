use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;

use crate::analysis::models::AnalysisResult;
use crate::drafting::statement::{draft_statement, StatementDraft};
use crate::drafting::style::WritingStyle;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub result: AnalysisResult,
    #[serde(default)]
    pub style: WritingStyle,
}

/// POST /api/v1/statements/draft
pub async fn handle_draft_statement(
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<StatementDraft>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    Ok(Json(draft_statement(&req.result, req.style)))
}
