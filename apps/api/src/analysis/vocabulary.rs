//! Domain vocabulary — every keyword list the heuristics depend on.
//!
//! The built-in defaults are tuned to public-sector healthcare recruitment
//! (person specifications, NHS-style values, clinical vs administrative roles).
//! Another domain ships a JSON file with its own lists; fields it omits keep
//! the defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainVocabulary {
    /// Canonical value phrases searched for in the posting, in output order.
    pub value_phrases: Vec<String>,
    /// Substituted when the posting mentions none of `value_phrases`.
    pub default_values: Vec<String>,

    /// Headings that open a person specification.
    pub person_spec_headings: Vec<String>,
    /// Looser headings used when no person specification heading exists.
    pub requirement_headings: Vec<String>,
    pub essential_headings: Vec<String>,
    pub desirable_headings: Vec<String>,
    /// Headings that close a person specification.
    pub section_end_headings: Vec<String>,
    pub strong_obligation_phrases: Vec<String>,
    pub soft_obligation_phrases: Vec<String>,

    pub skill_indicators: Vec<String>,
    pub skills_section_headers: Vec<String>,

    pub experience_section_headers: Vec<String>,
    /// Other profile sections; any of these ends the experience section.
    pub profile_section_headers: Vec<String>,
    pub clinical_keywords: Vec<String>,
    pub administrative_keywords: Vec<String>,
    pub generic_work_terms: Vec<String>,

    /// Words ignored when tokenizing requirements for matching.
    pub stopwords: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DomainVocabulary {
    fn default() -> Self {
        Self {
            value_phrases: owned(&[
                "respect and dignity",
                "commitment to quality of care",
                "compassion",
                "improving lives",
                "working together",
                "everyone counts",
                "patients first",
                "kindness",
                "integrity",
                "inclusion",
                "openness",
                "teamwork",
            ]),
            default_values: owned(&[
                "respect and dignity",
                "commitment to quality of care",
                "compassion",
                "improving lives",
                "working together",
            ]),
            person_spec_headings: owned(&[
                "person specification",
                "person spec",
                "selection criteria",
                "shortlisting criteria",
                "about you",
                "what we are looking for",
                "what we're looking for",
                "the ideal candidate",
            ]),
            requirement_headings: owned(&[
                "essential",
                "requirements",
                "qualifications",
                "criteria",
            ]),
            essential_headings: owned(&["essential", "mandatory", "must have"]),
            desirable_headings: owned(&["desirable", "preferred", "nice to have"]),
            section_end_headings: owned(&[
                "about us",
                "about the role",
                "about the organisation",
                "about the organization",
                "responsibilities",
                "duties",
                "job description",
                "benefits",
                "how to apply",
            ]),
            strong_obligation_phrases: owned(&[
                "must have",
                "required",
                "essential",
                "you will have",
                "you should have",
                "you must have",
                "you must",
            ]),
            soft_obligation_phrases: owned(&[
                "desirable",
                "preferred",
                "advantageous",
                "beneficial",
                "nice to have",
            ]),
            skill_indicators: owned(&[
                "skill",
                "proficient",
                "experienced in",
                "trained in",
                "responsible for",
                "expert in",
                "knowledge of",
                "competent in",
                "qualified in",
                "certified in",
            ]),
            skills_section_headers: owned(&[
                "skills",
                "key skills",
                "core skills",
                "technical skills",
                "clinical skills",
                "competencies",
                "core competencies",
            ]),
            experience_section_headers: owned(&[
                "experience",
                "work experience",
                "professional experience",
                "clinical experience",
                "employment",
                "employment history",
                "work history",
                "career history",
            ]),
            profile_section_headers: owned(&[
                "education",
                "qualifications",
                "training",
                "skills",
                "key skills",
                "certifications",
                "references",
                "interests",
                "hobbies",
                "volunteering",
                "personal statement",
                "profile",
                "summary",
                "memberships",
                "publications",
                "languages",
            ]),
            clinical_keywords: owned(&[
                "patient",
                "clinical",
                "nurse",
                "nursing",
                "ward",
                "carer",
                "medication",
                "treatment",
                "diagnosis",
                "hospital",
                "theatre",
                "midwife",
                "therapy",
                "assessment",
                "triage",
                "wound",
                "health",
            ]),
            administrative_keywords: owned(&[
                "administration",
                "administrative",
                "admin",
                "office",
                "reception",
                "filing",
                "data entry",
                "scheduling",
                "records",
                "clerical",
                "secretary",
                "finance",
                "coordinator",
                "booking",
                "correspondence",
            ]),
            generic_work_terms: owned(&["experience", "work", "job", "position", "role"]),
            stopwords: owned(&[
                "with", "this", "that", "have", "from", "were", "what", "when", "where", "which",
                "their", "there", "these", "those", "will", "should", "could", "would", "able",
            ]),
        }
    }
}

impl DomainVocabulary {
    /// Loads a vocabulary from a JSON file. Missing fields keep the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut vocabulary: DomainVocabulary =
            serde_json::from_str(raw).context("Vocabulary is not valid JSON")?;
        vocabulary.normalize();
        Ok(vocabulary)
    }

    /// Lowercases every phrase and restores the default values if the list was
    /// emptied, so value tagging can never come back empty.
    fn normalize(&mut self) {
        for list in [
            &mut self.value_phrases,
            &mut self.default_values,
            &mut self.person_spec_headings,
            &mut self.requirement_headings,
            &mut self.essential_headings,
            &mut self.desirable_headings,
            &mut self.section_end_headings,
            &mut self.strong_obligation_phrases,
            &mut self.soft_obligation_phrases,
            &mut self.skill_indicators,
            &mut self.skills_section_headers,
            &mut self.experience_section_headers,
            &mut self.profile_section_headers,
            &mut self.clinical_keywords,
            &mut self.administrative_keywords,
            &mut self.generic_work_terms,
            &mut self.stopwords,
        ] {
            list.retain(|p| !p.trim().is_empty());
            for phrase in list.iter_mut() {
                *phrase = phrase.trim().to_lowercase();
            }
        }

        if self.default_values.is_empty() {
            warn!("Vocabulary has no default values; keeping the built-in defaults");
            self.default_values = DomainVocabulary::default().default_values;
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.iter().any(|s| s == word)
    }
}
