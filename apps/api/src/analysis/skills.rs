//! Skill extraction — short capability phrases pulled from the profile.

use tracing::debug;

use crate::analysis::text::{normalize_heading, split_sentences_and_lines, strip_list_marker};
use crate::analysis::vocabulary::DomainVocabulary;

pub const MAX_SKILLS: usize = 15;
const MIN_SKILL_PHRASE_CHARS: usize = 6;
const MAX_SECTION_SKILL_CHARS: usize = 60;
const SKILLS_HEADER_MAX_WORDS: usize = 4;

/// Words that may not start or end a candidate phrase.
const FUNCTION_WORDS: &[&str] = &[
    "i", "my", "me", "we", "our", "he", "she", "they", "the", "a", "an", "and", "or", "as", "at",
    "in", "of", "on", "to", "for", "with", "by", "this", "that", "during", "while", "have", "am",
    "is", "was",
];

/// Returns at most `MAX_SKILLS` deduplicated skill phrases, shortest first.
pub fn extract_skills(profile: &str, vocabulary: &DomainVocabulary) -> Vec<String> {
    let mut candidates = skills_section_items(profile, vocabulary);
    candidates.extend(indicator_sentence_phrases(profile, vocabulary));

    // Case-sensitive dedup keeping first occurrence.
    let mut skills: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !skills.contains(&candidate) {
            skills.push(candidate);
        }
    }

    // Stable: equal lengths keep discovery order.
    skills.sort_by_key(|s| s.chars().count());
    skills.truncate(MAX_SKILLS);

    debug!(count = skills.len(), "Extracted skills");
    skills
}

/// List items of any paragraph whose first line is a skills header.
fn skills_section_items(profile: &str, vocabulary: &DomainVocabulary) -> Vec<String> {
    let mut items = Vec::new();
    for paragraph in paragraphs(profile) {
        let Some(first) = paragraph.first() else {
            continue;
        };
        let header = normalize_heading(first);
        let is_skills_header = header.split_whitespace().count() <= SKILLS_HEADER_MAX_WORDS
            && vocabulary
                .skills_section_headers
                .iter()
                .any(|h| header.starts_with(h.as_str()));
        if !is_skills_header {
            continue;
        }
        items.extend(
            paragraph[1..]
                .iter()
                .filter_map(|line| strip_list_marker(line))
                .map(|item| item.trim_end_matches(['.', ',', ';']).trim())
                .filter(|item| !item.is_empty() && item.chars().count() <= MAX_SECTION_SKILL_CHARS)
                .map(String::from),
        );
    }
    items
}

/// Paragraphs as lists of trimmed, non-empty lines, split on blank lines.
fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// 2- and 3-word phrases beginning with a capitalized word, taken from
/// sentences that contain a skill indicator.
fn indicator_sentence_phrases(profile: &str, vocabulary: &DomainVocabulary) -> Vec<String> {
    let mut phrases = Vec::new();
    for sentence in split_sentences_and_lines(profile) {
        if vocabulary
            .skills_section_headers
            .contains(&normalize_heading(sentence))
        {
            continue;
        }
        let lower = sentence.to_lowercase();
        if !vocabulary
            .skill_indicators
            .iter()
            .any(|indicator| lower.contains(indicator.as_str()))
        {
            continue;
        }

        let words: Vec<&str> = sentence
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#'))
            .filter(|w| !w.is_empty())
            .collect();

        for start in 0..words.len() {
            let first = words[start];
            if !first.starts_with(|c: char| c.is_uppercase()) || is_function_word(first) {
                continue;
            }
            for len in [2, 3] {
                let Some(window) = words.get(start..start + len) else {
                    break;
                };
                if window.last().is_some_and(|w| is_function_word(w)) {
                    continue;
                }
                let phrase = window.join(" ");
                if phrase.chars().count() >= MIN_SKILL_PHRASE_CHARS {
                    phrases.push(phrase);
                }
            }
        }
    }
    phrases
}

fn is_function_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    FUNCTION_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(profile: &str) -> Vec<String> {
        extract_skills(profile, &DomainVocabulary::default())
    }

    #[test]
    fn test_skills_section_bullets_are_taken_directly() {
        let profile = "Jane Doe\n\nKey Skills\n- Venepuncture\n- Wound care\n• Triage\n\nEducation\n- BSc Nursing";
        let skills = extract(profile);
        assert_eq!(skills, vec!["Triage", "Wound care", "Venepuncture"]);
    }

    #[test]
    fn test_phrases_from_indicator_sentences() {
        let profile = "I am proficient in Venepuncture and Cannulation.";
        let skills = extract(profile);
        assert!(skills.contains(&"Venepuncture and Cannulation".to_string()), "got {skills:?}");
        assert!(!skills.iter().any(|s| s.starts_with("I ")), "got {skills:?}");
        assert!(!skills.iter().any(|s| s.ends_with(" and")), "got {skills:?}");
    }

    #[test]
    fn test_sentences_without_indicator_are_ignored() {
        let skills = extract("I enjoy Hill Walking and Wild Swimming.");
        assert!(skills.is_empty(), "got {skills:?}");
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let profile = "Skills\n- Triage\n- triage\n- Triage";
        let skills = extract(profile);
        assert_eq!(skills, vec!["Triage", "triage"]);
    }

    #[test]
    fn test_bounded_and_shortest_first() {
        let mut profile = String::from("Skills\n");
        for i in 0..30 {
            profile.push_str(&format!("- Skill number {}{}\n", i, "x".repeat(i % 7)));
        }
        let skills = extract(&profile);
        assert_eq!(skills.len(), MAX_SKILLS);
        let lengths: Vec<usize> = skills.iter().map(|s| s.chars().count()).collect();
        let mut sorted = lengths.clone();
        sorted.sort();
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn test_empty_profile() {
        assert!(extract("").is_empty());
    }
}
