//! Requirement extraction — segments a posting into prioritized requirement
//! statements.
//!
//! Algorithm:
//! 1. Walk the posting line by line with a two-state machine (`Outside`,
//!    `InSpec(tier)`).
//! 2. A person-specification heading opens the section. Postings without one
//!    fall back to looser "essential / requirements / qualifications" headings.
//! 3. Inside the section, tier headings switch between Essential and
//!    Desirable; list items and `Label: text` lines become requirements.
//! 4. A short "about us / responsibilities / duties" heading closes it.
//! 5. If nothing was captured, sentences with obligation language are used.

use tracing::debug;

use crate::analysis::models::{Priority, RequirementItem};
use crate::analysis::text::{
    normalize_heading, split_sentences_and_lines, strip_list_marker, truncate_with_ellipsis,
    MAX_SNIPPET_CHARS,
};
use crate::analysis::vocabulary::DomainVocabulary;

/// Captured text must be strictly longer than this after marker stripping.
const MIN_REQUIREMENT_CHARS: usize = 10;
/// Lines at or above this length never close the section (they are prose).
const SECTION_END_MAX_CHARS: usize = 50;
const HEADING_MAX_WORDS: usize = 6;
const TIER_HEADING_MAX_WORDS: usize = 4;
const LABEL_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Outside,
    InSpec(Priority),
}

/// Extracts requirements from posting text, in document order.
/// An empty result is valid; callers must tolerate it.
pub fn extract_requirements(posting: &str, vocabulary: &DomainVocabulary) -> Vec<RequirementItem> {
    let lines: Vec<&str> = posting
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let has_person_spec = lines
        .iter()
        .any(|l| is_heading(l, &vocabulary.person_spec_headings));
    let openers = if has_person_spec {
        &vocabulary.person_spec_headings
    } else {
        &vocabulary.requirement_headings
    };

    let mut state = SectionState::Outside;
    let mut items = Vec::new();

    for line in lines {
        match state {
            SectionState::Outside => {
                if !is_heading(line, openers) {
                    continue;
                }
                // The opening heading may itself name the tier ("Desirable criteria").
                let priority = match match_tier_heading(line, vocabulary) {
                    Some((tier, inline)) => {
                        push_if_long_enough(&mut items, inline, tier);
                        tier
                    }
                    None => Priority::Essential,
                };
                state = SectionState::InSpec(priority);
            }
            SectionState::InSpec(priority) => {
                if closes_section(line, vocabulary) {
                    state = SectionState::Outside;
                    continue;
                }
                if let Some((tier, inline)) = tier_line(line, vocabulary) {
                    push_if_long_enough(&mut items, inline, tier);
                    state = SectionState::InSpec(tier);
                    continue;
                }
                if let Some(body) = requirement_line(line) {
                    push_if_long_enough(&mut items, body, priority);
                }
            }
        }
    }

    if items.is_empty() {
        debug!("No structured requirement section found; scanning for obligation language");
        items = extract_from_obligation_language(posting, vocabulary);
    }

    debug!(count = items.len(), "Extracted requirements");
    items
}

fn push_if_long_enough(items: &mut Vec<RequirementItem>, body: &str, priority: Priority) {
    let body = body.trim();
    if body.chars().count() > MIN_REQUIREMENT_CHARS {
        items.push(RequirementItem::new(
            &truncate_with_ellipsis(body, MAX_SNIPPET_CHARS),
            priority,
        ));
    }
}

/// A heading is a short, non-list line without terminal punctuation that
/// contains one of `phrases`.
fn is_heading(line: &str, phrases: &[String]) -> bool {
    if strip_list_marker(line).is_some() || line.ends_with('.') {
        return false;
    }
    let heading = normalize_heading(line);
    heading.split_whitespace().count() <= HEADING_MAX_WORDS
        && phrases.iter().any(|p| heading.contains(p.as_str()))
}

fn closes_section(line: &str, vocabulary: &DomainVocabulary) -> bool {
    line.chars().count() < SECTION_END_MAX_CHARS && is_heading(line, &vocabulary.section_end_headings)
}

/// Recognizes "Essential", "Desirable criteria:" and inline forms such as
/// "Essential: NMC registration". Returns the tier and any inline text.
fn match_tier_heading<'a>(line: &'a str, vocabulary: &DomainVocabulary) -> Option<(Priority, &'a str)> {
    if strip_list_marker(line).is_some() {
        return None;
    }
    let (head, inline) = match line.find(':') {
        Some(idx) => (&line[..idx], line[idx + 1..].trim()),
        None => (line, ""),
    };
    let head = normalize_heading(head);
    if head.is_empty() || head.split_whitespace().count() > TIER_HEADING_MAX_WORDS {
        return None;
    }

    let names = |phrases: &[String]| phrases.iter().any(|p| head.contains(p.as_str()));
    if names(&vocabulary.essential_headings) {
        Some((Priority::Essential, inline))
    } else if names(&vocabulary.desirable_headings) {
        Some((Priority::Desirable, inline))
    } else {
        None
    }
}

/// Tier heading on its own line, or a list item labelled with a tier
/// ("• Desirable: Leadership course").
fn tier_line<'a>(line: &'a str, vocabulary: &DomainVocabulary) -> Option<(Priority, &'a str)> {
    match strip_list_marker(line) {
        Some(item) if item.contains(':') => match_tier_heading(item, vocabulary),
        Some(_) => None,
        None => match_tier_heading(line, vocabulary),
    }
}

/// List items yield their text without the marker; `Label: text` lines are
/// kept whole.
fn requirement_line(line: &str) -> Option<&str> {
    if let Some(item) = strip_list_marker(line) {
        return Some(item);
    }
    let idx = line.find(':')?;
    let label = line[..idx].trim();
    let rest = line[idx + 1..].trim();
    let looks_like_label = !label.is_empty()
        && label.chars().count() <= LABEL_MAX_CHARS
        && label.starts_with(|c: char| c.is_uppercase())
        && !label.contains('.');
    (looks_like_label && !rest.is_empty()).then_some(line)
}

fn extract_from_obligation_language(posting: &str, vocabulary: &DomainVocabulary) -> Vec<RequirementItem> {
    let mut items = Vec::new();
    for sentence in split_sentences_and_lines(posting) {
        let lower = sentence.to_lowercase();
        let priority = if vocabulary
            .strong_obligation_phrases
            .iter()
            .any(|p| lower.contains(p.as_str()))
        {
            Priority::Essential
        } else if vocabulary
            .soft_obligation_phrases
            .iter()
            .any(|p| lower.contains(p.as_str()))
        {
            Priority::Desirable
        } else {
            continue;
        };
        let body = strip_list_marker(sentence).unwrap_or(sentence);
        push_if_long_enough(&mut items, body, priority);
    }
    items
}
