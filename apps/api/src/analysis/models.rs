//! Data model shared by every stage of the comparison pipeline.

use serde::{Deserialize, Serialize};

pub const ESSENTIAL_PREFIX: &str = "[Essential]";
pub const DESIRABLE_PREFIX: &str = "[Desirable]";

/// Logical role of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    Profile,
    Posting,
}

/// Plain text plus the role it plays in the comparison. Never mutated.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub role: DocumentRole,
    pub text: String,
}

impl RawDocument {
    pub fn profile(text: impl Into<String>) -> Self {
        Self {
            role: DocumentRole::Profile,
            text: text.into(),
        }
    }

    pub fn posting(text: impl Into<String>) -> Self {
        Self {
            role: DocumentRole::Posting,
            text: text.into(),
        }
    }
}

/// The three text inputs of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub profile: RawDocument,
    pub posting: RawDocument,
    /// Free-text addenda, e.g. gap justifications typed by the candidate.
    pub addenda: String,
}

impl AnalysisInput {
    pub fn new(profile: impl Into<String>, posting: impl Into<String>) -> Self {
        Self {
            profile: RawDocument::profile(profile),
            posting: RawDocument::posting(posting),
            addenda: String::new(),
        }
    }

    pub fn with_addenda(mut self, addenda: impl Into<String>) -> Self {
        self.addenda = addenda.into();
        self
    }
}

/// Priority tier attached to a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Essential,
    Desirable,
}

impl Priority {
    pub fn prefix(self) -> &'static str {
        match self {
            Priority::Essential => ESSENTIAL_PREFIX,
            Priority::Desirable => DESIRABLE_PREFIX,
        }
    }
}

/// A single requirement extracted from the posting. `text` carries the
/// `[Essential]` / `[Desirable]` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementItem {
    pub text: String,
    pub priority: Priority,
}

impl RequirementItem {
    pub fn new(body: &str, priority: Priority) -> Self {
        Self {
            text: format!("{} {}", priority.prefix(), body.trim()),
            priority,
        }
    }

    /// The requirement text without its priority prefix.
    pub fn body(&self) -> &str {
        strip_priority_prefix(&self.text)
    }
}

pub fn strip_priority_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    [ESSENTIAL_PREFIX, DESIRABLE_PREFIX]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed)
        .trim()
}

/// Category decided by the keyword-count contest in the experience segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceCategory {
    Clinical,
    Administrative,
    NonClinical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Single-line title / employer / date range, at most 100 characters.
    pub summary: String,
    pub category: ExperienceCategory,
}

/// A requirement the profile covers, with the supporting evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub requirement: RequirementItem,
    pub evidence: String,
    pub matched_keywords: Vec<String>,
}

/// Aggregate output of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub tenure_years: u32,
    pub value_tags: Vec<String>,
    pub matched_requirements: Vec<MatchRecord>,
    pub missing_requirements: Vec<RequirementItem>,
    pub recommended_highlights: Vec<String>,
}

impl AnalysisResult {
    pub fn experience_in(&self, category: ExperienceCategory) -> impl Iterator<Item = &ExperienceEntry> {
        self.experience.iter().filter(move |e| e.category == category)
    }
}
