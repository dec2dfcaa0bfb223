//! Value tagging — which organizational values the posting talks about.

use crate::analysis::vocabulary::DomainVocabulary;

/// Returns the canonical value phrases found in the posting (case-insensitive
/// substring scan, canonical order). Falls back to the vocabulary's default
/// values so the result is never empty.
pub fn tag_values(posting: &str, vocabulary: &DomainVocabulary) -> Vec<String> {
    let posting_lower = posting.to_lowercase();

    let found: Vec<String> = vocabulary
        .value_phrases
        .iter()
        .filter(|phrase| posting_lower.contains(phrase.as_str()))
        .cloned()
        .collect();

    if found.is_empty() {
        vocabulary.default_values.clone()
    } else {
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_values_case_insensitively_in_canonical_order() {
        let posting = "We value Working Together and treat everyone with Respect and Dignity.";
        let tags = tag_values(posting, &DomainVocabulary::default());
        assert_eq!(tags, vec!["respect and dignity", "working together"]);
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let vocabulary = DomainVocabulary::default();
        let tags = tag_values("Band 5 staff nurse vacancy", &vocabulary);
        assert_eq!(tags, vocabulary.default_values);
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn test_never_empty_for_empty_posting() {
        assert!(!tag_values("", &DomainVocabulary::default()).is_empty());
    }

    #[test]
    fn test_synonyms_are_detected() {
        let tags = tag_values("Our culture puts patients first.", &DomainVocabulary::default());
        assert_eq!(tags, vec!["patients first"]);
    }
}
