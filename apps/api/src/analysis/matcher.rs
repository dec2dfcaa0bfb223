//! Requirement matching — classifies each requirement as matched (with
//! evidence) or missing against the candidate's profile.
//!
//! Algorithm, per requirement:
//! 1. Strip the priority prefix and tokenize into lowercase words of at least
//!    `MIN_TOKEN_CHARS` characters, minus stopwords.
//! 2. A token hits when the profile (plus addenda) contains it, or contains a
//!    word with the same stem (see `same_stem`).
//! 3. `MIN_KEYWORD_HITS` or more hits → matched; evidence is the profile
//!    sentence holding the most hit tokens.
//! 4. Anything else → missing, unmodified.

use tracing::debug;

use crate::analysis::models::{MatchRecord, RequirementItem};
use crate::analysis::text::{
    split_sentences_and_lines, strip_list_marker, truncate_with_ellipsis, MAX_SNIPPET_CHARS,
};
use crate::analysis::vocabulary::DomainVocabulary;

/// Tokens shorter than this are ignored.
pub const MIN_TOKEN_CHARS: usize = 4;
/// Minimum number of distinct token hits for a requirement to count as matched.
pub const MIN_KEYWORD_HITS: usize = 2;
/// Stems shorter than this never match by stem, only by containment.
pub const MIN_STEM_CHARS: usize = 5;
/// Inflection endings removed before comparing stems, longest first.
const SUFFIXES: [&str; 18] = [
    "ations", "ation", "ition", "ments", "ment", "ings", "ing", "ions", "ion", "ered", "ers",
    "ies", "ity", "ed", "er", "es", "s", "y",
];

/// Partition of the input requirements. Together they hold every requirement
/// exactly once, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matched: Vec<MatchRecord>,
    pub missing: Vec<RequirementItem>,
}

/// Lowercased text plus its words, searched by token.
struct TextIndex {
    lower: String,
    words: Vec<String>,
}

impl TextIndex {
    fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_STEM_CHARS)
            .map(String::from)
            .collect();
        Self { lower, words }
    }

    fn hits(&self, token: &str) -> bool {
        self.lower.contains(token) || self.words.iter().any(|w| same_stem(token, w))
    }
}

/// Word with its first matching suffix removed, keeping at least four characters.
fn stem(word: &str) -> &str {
    SUFFIXES
        .iter()
        .find_map(|suffix| {
            word.strip_suffix(suffix)
                .filter(|rest| rest.chars().count() >= 4)
        })
        .unwrap_or(word)
}

/// Two words share a stem when, after suffix removal, the shorter stem has at
/// least `MIN_STEM_CHARS` characters and the longer one extends it by at most
/// one character ("administr" / "administ", but not "communic" / "commun").
fn same_stem(a: &str, b: &str) -> bool {
    let (a, b) = (stem(a), stem(b));
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= MIN_STEM_CHARS
        && long.starts_with(short)
        && long.chars().count() - short.chars().count() <= 1
}

/// Splits a requirement body into distinct lowercase matching tokens, in order.
pub fn tokenize(text: &str, vocabulary: &DomainVocabulary) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() < MIN_TOKEN_CHARS || vocabulary.is_stopword(word) {
            continue;
        }
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}

pub fn match_requirements(
    requirements: &[RequirementItem],
    profile: &str,
    addenda: &str,
    vocabulary: &DomainVocabulary,
) -> MatchOutcome {
    let combined = if addenda.trim().is_empty() {
        TextIndex::new(profile)
    } else {
        TextIndex::new(&format!("{profile}\n{addenda}"))
    };
    let sentences: Vec<(&str, TextIndex)> = split_sentences_and_lines(profile)
        .into_iter()
        .map(|s| strip_list_marker(s).unwrap_or(s))
        .filter(|s| !s.is_empty())
        .map(|s| (s, TextIndex::new(s)))
        .collect();

    let mut outcome = MatchOutcome::default();
    for requirement in requirements {
        let hits: Vec<String> = tokenize(requirement.body(), vocabulary)
            .into_iter()
            .filter(|token| combined.hits(token))
            .collect();

        if hits.len() < MIN_KEYWORD_HITS {
            outcome.missing.push(requirement.clone());
            continue;
        }

        let evidence = best_sentence(&sentences, &hits)
            .map(|s| truncate_with_ellipsis(s, MAX_SNIPPET_CHARS))
            .unwrap_or_else(|| format!("Matches keywords: {}", hits.join(", ")));

        outcome.matched.push(MatchRecord {
            requirement: requirement.clone(),
            evidence,
            matched_keywords: hits,
        });
    }

    debug!(
        matched = outcome.matched.len(),
        missing = outcome.missing.len(),
        "Matched requirements"
    );
    outcome
}

/// The first sentence with the highest number of hit tokens, if any sentence
/// holds at least one.
fn best_sentence<'a>(sentences: &[(&'a str, TextIndex)], hits: &[String]) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for (sentence, index) in sentences {
        let count = hits.iter().filter(|token| index.hits(token)).count();
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((*sentence, count));
        }
    }
    best.map(|(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::Priority;

    fn run(requirements: &[RequirementItem], profile: &str, addenda: &str) -> MatchOutcome {
        match_requirements(requirements, profile, addenda, &DomainVocabulary::default())
    }

    #[test]
    fn test_tokenize_drops_short_words_and_stopwords() {
        let tokens = tokenize("Experience with medication administration and IV", &DomainVocabulary::default());
        assert_eq!(tokens, vec!["experience", "medication", "administration"]);
    }

    #[test]
    fn test_medication_administration_matches_with_sentence_evidence() {
        let requirement = RequirementItem::new("Experience with medication administration", Priority::Essential);
        let profile = "Staff nurse on a surgical ward. Administered medication safely to 20 patients daily. Keen runner.";
        let outcome = run(&[requirement.clone()], profile, "");
        assert_eq!(outcome.matched.len(), 1, "missing: {:?}", outcome.missing);
        let record = &outcome.matched[0];
        assert_eq!(record.requirement, requirement);
        assert_eq!(record.evidence, "Administered medication safely to 20 patients daily");
        assert!(record.matched_keywords.contains(&"medication".to_string()));
        assert!(record.matched_keywords.contains(&"administration".to_string()));
    }

    #[test]
    fn test_no_overlap_is_missing() {
        let requirement = RequirementItem::new("Current HGV driving licence", Priority::Essential);
        let outcome = run(&[requirement.clone()], "Administered medication safely.", "");
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.missing, vec![requirement]);
    }

    #[test]
    fn test_single_hit_is_not_enough() {
        let requirement = RequirementItem::new("Phlebotomy certificate", Priority::Desirable);
        let outcome = run(&[requirement], "Completed phlebotomy training.", "");
        assert_eq!(outcome.missing.len(), 1);
    }

    #[test]
    fn test_addenda_count_towards_hits_with_keyword_evidence() {
        let requirement = RequirementItem::new("Leadership course completion", Priority::Desirable);
        let outcome = run(
            &[requirement],
            "Staff nurse since 2018.",
            "I finished a leadership course in 2023 and await completion certificate.",
        );
        assert_eq!(outcome.matched.len(), 1);
        assert_eq!(
            outcome.matched[0].evidence,
            "Matches keywords: leadership, course, completion"
        );
    }

    #[test]
    fn test_partition_preserves_order_and_covers_input() {
        let requirements = vec![
            RequirementItem::new("Registered nurse with ward experience", Priority::Essential),
            RequirementItem::new("Forklift licence", Priority::Essential),
            RequirementItem::new("Mentoring nursing students", Priority::Desirable),
        ];
        let profile = "Registered nurse with five years ward experience. Mentored nursing students on placement.";
        let outcome = run(&requirements, profile, "");
        assert_eq!(outcome.matched.len() + outcome.missing.len(), requirements.len());
        assert_eq!(outcome.matched[0].requirement, requirements[0]);
        assert_eq!(outcome.matched[1].requirement, requirements[2]);
        assert_eq!(outcome.missing, vec![requirements[1].clone()]);
    }

    #[test]
    fn test_evidence_prefers_sentence_with_most_hits() {
        let requirement = RequirementItem::new("Wound care and tissue viability", Priority::Essential);
        let profile = "Wound dressings daily. Led wound care audits with the tissue viability team. Wound clinic.";
        let outcome = run(&[requirement], profile, "");
        assert_eq!(
            outcome.matched[0].evidence,
            "Led wound care audits with the tissue viability team"
        );
    }

    #[test]
    fn test_same_stem() {
        assert!(same_stem("administration", "administered"));
        assert!(same_stem("mentoring", "mentored"));
        assert!(same_stem("experienced", "experience"));
        assert!(!same_stem("community", "communication"));
    }

    #[test]
    fn test_shared_prefix_alone_does_not_match() {
        let requirement = RequirementItem::new("Community engagement programmes", Priority::Desirable);
        let profile = "Excellent communication with patients. Engaged with families on the ward.";
        let outcome = run(&[requirement.clone()], profile, "");
        assert!(outcome.matched.is_empty(), "matched: {:?}", outcome.matched);
        assert_eq!(outcome.missing, vec![requirement]);
    }

    #[test]
    fn test_evidence_drops_bullet_marker() {
        let requirement = RequirementItem::new("Experience with medication administration", Priority::Essential);
        let profile = "Work History\n- Administered medication on night shifts";
        let outcome = run(&[requirement], profile, "");
        assert_eq!(outcome.matched[0].evidence, "Administered medication on night shifts");
    }

    #[test]
    fn test_empty_requirement_list() {
        let outcome = run(&[], "anything", "");
        assert_eq!(outcome, MatchOutcome::default());
    }
}
