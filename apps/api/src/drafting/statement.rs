//! Statement drafting — turns an `AnalysisResult` into the paragraphs of a
//! supporting statement.
//!
//! Paragraph order:
//! 1. Opening: style opening, tenure, first two value tags.
//! 2. One paragraph per matched requirement (at most `MAX_REQUIREMENT_PARAGRAPHS`),
//!    citing its evidence.
//! 3. Strongest experience category plus top skills (omitted when neither exists).
//! 4. Closing line.
//!
//! Missing requirements are never claimed; they are listed back as unaddressed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::models::{AnalysisResult, ExperienceCategory, MatchRecord};
use crate::analysis::text::lowercase_initial;
use crate::drafting::style::{style_guide, StyleGuide, WritingStyle};

pub const MAX_REQUIREMENT_PARAGRAPHS: usize = 4;
const TOP_SKILLS: usize = 3;
const KEYWORD_EVIDENCE_PREFIX: &str = "Matches keywords: ";

/// Category preference when counts tie.
const CATEGORY_ORDER: [ExperienceCategory; 3] = [
    ExperienceCategory::Clinical,
    ExperienceCategory::Administrative,
    ExperienceCategory::NonClinical,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementDraft {
    pub style: WritingStyle,
    pub paragraphs: Vec<String>,
    pub word_count: usize,
    /// Requirement texts the draft writes about, in order.
    pub addressed_requirements: Vec<String>,
    /// Requirement texts the draft leaves alone: every missing requirement,
    /// then matched ones beyond the paragraph limit.
    pub unaddressed_requirements: Vec<String>,
}

pub fn draft_statement(result: &AnalysisResult, style: WritingStyle) -> StatementDraft {
    let guide = style_guide(style);
    let mut paragraphs = vec![opening_paragraph(result, &guide)];

    let (addressed, overflow) = result
        .matched_requirements
        .split_at(result.matched_requirements.len().min(MAX_REQUIREMENT_PARAGRAPHS));
    for (i, record) in addressed.iter().enumerate() {
        let opener = guide.requirement_openers[i % guide.requirement_openers.len()];
        paragraphs.push(requirement_paragraph(record, opener, &guide));
    }

    if let Some(paragraph) = background_paragraph(result) {
        paragraphs.push(paragraph);
    }
    paragraphs.push(guide.closing.to_string());

    let word_count = paragraphs.iter().map(|p| p.split_whitespace().count()).sum();
    let unaddressed_requirements = result
        .missing_requirements
        .iter()
        .map(|r| r.text.clone())
        .chain(overflow.iter().map(|m| m.requirement.text.clone()))
        .collect();

    debug!(?style, paragraphs = paragraphs.len(), word_count, "Drafted statement");

    StatementDraft {
        style,
        paragraphs,
        word_count,
        addressed_requirements: addressed.iter().map(|m| m.requirement.text.clone()).collect(),
        unaddressed_requirements,
    }
}

fn opening_paragraph(result: &AnalysisResult, guide: &StyleGuide) -> String {
    let experience = match result.tenure_years {
        0 => "I bring relevant experience".to_string(),
        1 => "I bring 1 year of experience".to_string(),
        n => format!("I bring {n} years of experience"),
    };
    let values = match result.value_tags.as_slice() {
        [] => String::new(),
        [only] => format!(" and I share your commitment to {only}"),
        [first, second, ..] => format!(" and I share your commitment to {first} and {second}"),
    };
    format!("{} {experience}{values}.", guide.opening)
}

fn requirement_paragraph(record: &MatchRecord, opener: &str, guide: &StyleGuide) -> String {
    let requirement = lowercase_initial(record.requirement.body());
    let evidence = match record.evidence.strip_prefix(KEYWORD_EVIDENCE_PREFIX) {
        Some(_) if !record.matched_keywords.is_empty() => format!(
            "my background covers {}",
            join_list(&record.matched_keywords)
        ),
        _ => record.evidence.clone(),
    };
    format!(
        "{opener} {}. {} {}",
        requirement.trim_end_matches('.'),
        guide.evidence_lead,
        end_sentence(&evidence)
    )
}

fn background_paragraph(result: &AnalysisResult) -> Option<String> {
    let category = strongest_category(result);
    let skills: Vec<String> = result.skills.iter().take(TOP_SKILLS).cloned().collect();

    let background = category.map(|c| match c {
        ExperienceCategory::Clinical => "My clinical background gives me a solid base for this role",
        ExperienceCategory::Administrative => {
            "My administrative background gives me a solid base for this role"
        }
        ExperienceCategory::NonClinical => "My wider work experience gives me a solid base for this role",
    });

    match (background, skills.is_empty()) {
        (None, true) => None,
        (Some(text), true) => Some(format!("{text}.")),
        (None, false) => Some(format!("My skills include {}.", join_list(&skills))),
        (Some(text), false) => Some(format!("{text}, and my skills include {}.", join_list(&skills))),
    }
}

/// Category with the most entries; ties follow `CATEGORY_ORDER`.
fn strongest_category(result: &AnalysisResult) -> Option<ExperienceCategory> {
    let mut best: Option<(ExperienceCategory, usize)> = None;
    for category in CATEGORY_ORDER {
        let count = result.experience_in(category).count();
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

/// "a", "a and b", "a, b and c".
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

fn end_sentence(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ExperienceEntry, Priority, RequirementItem};
    use crate::drafting::style::avoided_phrases_in;

    fn matched(body: &str, evidence: &str, keywords: &[&str]) -> MatchRecord {
        MatchRecord {
            requirement: RequirementItem::new(body, Priority::Essential),
            evidence: evidence.to_string(),
            matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            skills: vec!["Triage".into(), "Wound care".into(), "Venepuncture".into(), "Phlebotomy".into()],
            experience: vec![
                ExperienceEntry {
                    summary: "Staff Nurse".into(),
                    category: ExperienceCategory::Clinical,
                },
                ExperienceEntry {
                    summary: "Ward Clerk".into(),
                    category: ExperienceCategory::Administrative,
                },
                ExperienceEntry {
                    summary: "Senior Nurse".into(),
                    category: ExperienceCategory::Clinical,
                },
            ],
            tenure_years: 8,
            value_tags: vec!["compassion".into(), "respect and dignity".into()],
            matched_requirements: vec![matched(
                "Experience with medication administration",
                "Administered medication safely to 20 patients daily",
                &["medication", "administration"],
            )],
            missing_requirements: vec![RequirementItem::new("Current HGV driving licence", Priority::Essential)],
            recommended_highlights: vec![],
        }
    }

    #[test]
    fn test_paragraph_structure() {
        let draft = draft_statement(&sample_result(), WritingStyle::Moderate);
        assert_eq!(draft.paragraphs.len(), 4);
        assert_eq!(
            draft.paragraphs[0],
            "I am writing to apply for this position. I bring 8 years of experience \
             and I share your commitment to compassion and respect and dignity."
        );
        assert_eq!(
            draft.paragraphs[1],
            "The role calls for experience with medication administration. My experience \
             demonstrates this: Administered medication safely to 20 patients daily."
        );
        assert_eq!(
            draft.paragraphs[2],
            "My clinical background gives me a solid base for this role, and my skills \
             include Triage, Wound care and Venepuncture."
        );
        assert_eq!(draft.paragraphs[3], style_guide(WritingStyle::Moderate).closing);
    }

    #[test]
    fn test_missing_requirements_are_never_claimed() {
        let draft = draft_statement(&sample_result(), WritingStyle::Simple);
        let text = draft.paragraphs.join("\n").to_lowercase();
        assert!(!text.contains("driving licence"));
        assert_eq!(draft.unaddressed_requirements, vec!["[Essential] Current HGV driving licence"]);
        assert_eq!(
            draft.addressed_requirements,
            vec!["[Essential] Experience with medication administration"]
        );
    }

    #[test]
    fn test_requirement_paragraphs_are_capped() {
        let mut result = sample_result();
        result.matched_requirements = (1..=6)
            .map(|i| matched(&format!("Requirement number {i}"), "Evidence sentence", &["number"]))
            .collect();
        let draft = draft_statement(&result, WritingStyle::Advanced);
        assert_eq!(draft.addressed_requirements.len(), MAX_REQUIREMENT_PARAGRAPHS);
        assert_eq!(
            draft.unaddressed_requirements,
            vec![
                "[Essential] Current HGV driving licence",
                "[Essential] Requirement number 5",
                "[Essential] Requirement number 6",
            ]
        );
        assert_eq!(draft.paragraphs.len(), 1 + MAX_REQUIREMENT_PARAGRAPHS + 2);
    }

    #[test]
    fn test_keyword_evidence_is_rewritten() {
        let record = matched(
            "Leadership course completion",
            "Matches keywords: leadership, course",
            &["leadership", "course"],
        );
        let guide = style_guide(WritingStyle::Simple);
        assert_eq!(
            requirement_paragraph(&record, "You need", &guide),
            "You need leadership course completion. I can show this: my background covers leadership and course."
        );
    }

    #[test]
    fn test_sparse_result() {
        let result = AnalysisResult {
            skills: vec![],
            experience: vec![],
            tenure_years: 0,
            value_tags: vec!["kindness".into()],
            matched_requirements: vec![],
            missing_requirements: vec![],
            recommended_highlights: vec![],
        };
        let draft = draft_statement(&result, WritingStyle::Simple);
        assert_eq!(draft.paragraphs.len(), 2);
        assert_eq!(
            draft.paragraphs[0],
            "I would like to apply for this job. I bring relevant experience and I share your commitment to kindness."
        );
    }

    #[test]
    fn test_drafts_avoid_style_phrases_and_are_deterministic() {
        for style in [WritingStyle::Simple, WritingStyle::Moderate, WritingStyle::Advanced] {
            let first = draft_statement(&sample_result(), style);
            let second = draft_statement(&sample_result(), style);
            assert_eq!(first, second);
            let text = first.paragraphs.join(" ");
            assert!(avoided_phrases_in(&text, &style_guide(style)).is_empty(), "{style:?}");
            assert_eq!(first.word_count, text.split_whitespace().count());
        }
    }

    #[test]
    fn test_strongest_category_tie_prefers_clinical() {
        let mut result = sample_result();
        result.experience.pop();
        assert_eq!(strongest_category(&result), Some(ExperienceCategory::Clinical));
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&["a".to_string()]), "a");
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(join_list(&items), "a, b and c");
    }
}
