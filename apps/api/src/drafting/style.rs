//! Writing styles — maps the requested reading level to the phrases a drafted
//! statement is built from.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingStyle {
    Simple,
    #[default]
    Moderate,
    Advanced,
}

/// Phrase set calibrated to one writing style.
#[derive(Debug, Clone)]
pub struct StyleGuide {
    pub opening: &'static str,
    /// Sentence openers that introduce each matched requirement, used in turn.
    pub requirement_openers: Vec<&'static str>,
    pub evidence_lead: &'static str,
    pub closing: &'static str,
    /// Phrases no draft in this style may contain.
    pub avoid_phrases: Vec<&'static str>,
}

pub fn style_guide(style: WritingStyle) -> StyleGuide {
    match style {
        WritingStyle::Simple => StyleGuide {
            opening: "I would like to apply for this job.",
            requirement_openers: vec![
                "You are looking for",
                "You also want",
                "You ask for",
                "You need",
            ],
            evidence_lead: "I can show this:",
            closing: "Thank you for reading my application. I would be glad to talk to you about it.",
            avoid_phrases: vec!["furthermore", "moreover", "notwithstanding", "hereby", "synergy"],
        },
        WritingStyle::Moderate => StyleGuide {
            opening: "I am writing to apply for this position.",
            requirement_openers: vec![
                "The role calls for",
                "You are also seeking",
                "The post requires",
                "In addition, you ask for",
            ],
            evidence_lead: "My experience demonstrates this:",
            closing: "Thank you for considering my application. I would welcome the opportunity to discuss it at interview.",
            avoid_phrases: vec!["hereby", "synergy", "go-getter", "think outside the box"],
        },
        WritingStyle::Advanced => StyleGuide {
            opening: "I am delighted to submit my application for this post.",
            requirement_openers: vec![
                "The post calls for",
                "Equally important is",
                "The person specification also highlights",
                "Finally, the role demands",
            ],
            evidence_lead: "My record evidences this:",
            closing: "I would value the opportunity to expand on this statement at interview and to contribute to the service.",
            avoid_phrases: vec!["synergy", "go-getter", "think outside the box", "hard worker"],
        },
    }
}

/// Avoided phrases that occur in `text`, compared case-insensitively.
pub fn avoided_phrases_in(text: &str, guide: &StyleGuide) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    guide
        .avoid_phrases
        .iter()
        .copied()
        .filter(|phrase| lower.contains(phrase))
        .collect()
}
