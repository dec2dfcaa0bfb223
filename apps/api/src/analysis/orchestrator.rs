//! Analysis orchestrator — runs the comparison pipeline over one profile and
//! one posting and assembles the `AnalysisResult`.
//!
//! Algorithm:
//! 1. Validate document shape (no NUL bytes, within the character limit).
//! 2. Tag organisational values in the posting.
//! 3. Extract requirements from the posting.
//! 4. Extract skills from the profile.
//! 5. Segment and categorize experience; estimate tenure.
//! 6. Match requirements against profile plus addenda.
//! 7. Derive recommended highlights.
//!
//! Each step reports a fixed progress checkpoint; completion (100) is reported
//! once whether the run succeeds or fails.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::{debug, info, warn};

use crate::analysis::experience::segment_experience;
use crate::analysis::highlights::recommend_highlights;
use crate::analysis::matcher::match_requirements;
use crate::analysis::models::{AnalysisInput, AnalysisResult, DocumentRole, RawDocument};
use crate::analysis::progress::{ProgressCallback, ProgressReporter, Stage};
use crate::analysis::requirements::extract_requirements;
use crate::analysis::skills::extract_skills;
use crate::analysis::values::tag_values;
use crate::analysis::vocabulary::DomainVocabulary;
use crate::config::DEFAULT_MAX_DOCUMENT_CHARS;
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Analyzer seam
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        input: &AnalysisInput,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<AnalysisResult, AppError>;

    /// Short backend name reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Rule-based analyzer. Fast, deterministic, no network calls.
pub struct HeuristicAnalyzer {
    engine: AnalysisEngine,
}

impl HeuristicAnalyzer {
    pub fn new(engine: AnalysisEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Analyzer for HeuristicAnalyzer {
    async fn analyze(
        &self,
        input: &AnalysisInput,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<AnalysisResult, AppError> {
        self.engine.analyze(input, progress)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    vocabulary: Arc<DomainVocabulary>,
    max_document_chars: usize,
    /// Year that "present" resolves to. `None` means the current UTC year,
    /// read at the start of each run.
    reference_year: Option<i32>,
}

impl AnalysisEngine {
    pub fn new(vocabulary: Arc<DomainVocabulary>) -> Self {
        Self {
            vocabulary,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            reference_year: None,
        }
    }

    pub fn with_max_document_chars(mut self, max_document_chars: usize) -> Self {
        self.max_document_chars = max_document_chars;
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn analyze(
        &self,
        input: &AnalysisInput,
        progress: Option<ProgressCallback<'_>>,
    ) -> Result<AnalysisResult, AppError> {
        let mut reporter = ProgressReporter::new(progress);
        let outcome = self.run(input, &mut reporter);
        match &outcome {
            Ok(_) => reporter.stage(Stage::Complete),
            Err(e) => {
                warn!("Analysis rejected: {e}");
                reporter.stage(Stage::Failed);
            }
        }
        outcome
    }

    fn run(
        &self,
        input: &AnalysisInput,
        reporter: &mut ProgressReporter<'_>,
    ) -> Result<AnalysisResult, AppError> {
        reporter.stage(Stage::Validating);
        self.validate_document(&input.profile)?;
        self.validate_document(&input.posting)?;
        self.validate_text("additional information", &input.addenda)?;

        let vocabulary = self.vocabulary.as_ref();
        let reference_year = self.reference_year.unwrap_or_else(|| Utc::now().year());
        let profile = input.profile.text.as_str();
        let posting = input.posting.text.as_str();

        reporter.stage(Stage::TaggingValues);
        let value_tags = tag_values(posting, vocabulary);
        debug!(count = value_tags.len(), "Tagged values");

        reporter.stage(Stage::ExtractingRequirements);
        let requirements = extract_requirements(posting, vocabulary);

        reporter.stage(Stage::ExtractingSkills);
        let skills = extract_skills(profile, vocabulary);

        reporter.stage(Stage::SegmentingExperience);
        let experience = segment_experience(profile, vocabulary, reference_year);

        reporter.stage(Stage::MatchingRequirements);
        let outcome = match_requirements(&requirements, profile, &input.addenda, vocabulary);

        reporter.stage(Stage::BuildingHighlights);
        let recommended_highlights =
            recommend_highlights(&value_tags, &outcome.matched, &experience.entries);

        info!(
            requirements = requirements.len(),
            matched = outcome.matched.len(),
            missing = outcome.missing.len(),
            skills = skills.len(),
            experience = experience.entries.len(),
            tenure_years = experience.tenure_years,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            skills,
            experience: experience.entries,
            tenure_years: experience.tenure_years,
            value_tags,
            matched_requirements: outcome.matched,
            missing_requirements: outcome.missing,
            recommended_highlights,
        })
    }

    fn validate_document(&self, document: &RawDocument) -> Result<(), AppError> {
        let name = match document.role {
            DocumentRole::Profile => "profile",
            DocumentRole::Posting => "posting",
        };
        self.validate_text(name, &document.text)
    }

    fn validate_text(&self, name: &str, text: &str) -> Result<(), AppError> {
        if text.contains('\0') {
            return Err(AppError::InvalidInput(format!(
                "{name} contains binary data; extract plain text first"
            )));
        }
        let chars = text.chars().count();
        if chars > self.max_document_chars {
            return Err(AppError::InvalidInput(format!(
                "{name} is {chars} characters long; the limit is {}",
                self.max_document_chars
            )));
        }
        Ok(())
    }
}
