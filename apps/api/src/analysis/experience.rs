//! Experience segmentation — splits the work history into entries and
//! classifies each one as clinical, administrative or other work.

use tracing::debug;

use crate::analysis::dates::{contains_date_range, find_date_range_text, is_date_only};
use crate::analysis::models::{ExperienceCategory, ExperienceEntry};
use crate::analysis::tenure::estimate_tenure;
use crate::analysis::text::{
    count_term, normalize_heading, single_line, strip_list_marker, truncate_with_ellipsis,
    MAX_SNIPPET_CHARS,
};
use crate::analysis::vocabulary::DomainVocabulary;

const SECTION_HEADER_MAX_WORDS: usize = 4;

/// Categorized work history plus the independently computed tenure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceProfile {
    pub entries: Vec<ExperienceEntry>,
    pub tenure_years: u32,
}

pub fn segment_experience(
    profile: &str,
    vocabulary: &DomainVocabulary,
    reference_year: i32,
) -> ExperienceProfile {
    let lines: Vec<&str> = profile
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut entries = match experience_section(&lines, vocabulary) {
        Some(section) => build_entries(section, vocabulary),
        None => Vec::new(),
    };
    if entries.is_empty() {
        debug!("No entries in an explicit experience section; scanning whole profile");
        entries = build_entries(&lines, vocabulary);
    }

    let tenure_years = estimate_tenure(profile, reference_year);
    debug!(entries = entries.len(), tenure_years, "Segmented experience");

    ExperienceProfile {
        entries,
        tenure_years,
    }
}

/// Keyword-count contest over one block of text describing a role.
/// Returns `None` when the block does not read like work history at all.
pub fn categorize(text: &str, vocabulary: &DomainVocabulary) -> Option<ExperienceCategory> {
    let lower = text.to_lowercase();
    let count = |terms: &[String]| -> usize { terms.iter().map(|t| count_term(&lower, t)).sum() };

    let clinical = count(&vocabulary.clinical_keywords);
    let administrative = count(&vocabulary.administrative_keywords);

    if clinical > 0 && clinical > administrative {
        Some(ExperienceCategory::Clinical)
    } else if administrative > 0 {
        Some(ExperienceCategory::Administrative)
    } else if count(&vocabulary.generic_work_terms) > 0 {
        Some(ExperienceCategory::NonClinical)
    } else {
        None
    }
}

/// Lines between an "Experience / Employment / Work History" heading and the
/// next recognized profile section heading.
fn experience_section<'a, 'b>(lines: &'b [&'a str], vocabulary: &DomainVocabulary) -> Option<&'b [&'a str]> {
    let start = lines.iter().position(|line| {
        section_heading(line).is_some_and(|h| {
            vocabulary
                .experience_section_headers
                .iter()
                .any(|p| h.contains(p.as_str()))
        })
    })? + 1;

    let end = lines[start..]
        .iter()
        .position(|line| {
            section_heading(line).is_some_and(|h| {
                vocabulary
                    .profile_section_headers
                    .iter()
                    .any(|p| names_section(&h, p))
            })
        })
        .map_or(lines.len(), |offset| start + offset);

    Some(&lines[start..end])
}

/// Normalized heading text if `line` can be a section heading: short, not a
/// list item, no digits.
fn section_heading(line: &str) -> Option<String> {
    if strip_list_marker(line).is_some() || line.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let heading = normalize_heading(line);
    (!heading.is_empty() && heading.split_whitespace().count() <= SECTION_HEADER_MAX_WORDS).then_some(heading)
}

/// "education", "education and training" and "education & training" all
/// name the education section; "education coordinator" does not.
fn names_section(heading: &str, section: &str) -> bool {
    match heading.strip_prefix(section) {
        Some(rest) => rest.is_empty() || rest.starts_with(" and ") || rest.starts_with(" & "),
        None => false,
    }
}

/// Splits lines into per-role blocks at date-range lines and turns each
/// categorizable block into an entry. Lines before the first date range are
/// dropped, except a title written directly above a date-only line.
fn build_entries(lines: &[&str], vocabulary: &DomainVocabulary) -> Vec<ExperienceEntry> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_entry = false;

    for &line in lines {
        if !contains_date_range(line) {
            current.push(line);
            continue;
        }

        let title_above = if is_date_only(line)
            && current
                .last()
                .is_some_and(|last| strip_list_marker(last).is_none() && !contains_date_range(last))
        {
            current.pop()
        } else {
            None
        };

        if in_entry {
            blocks.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
        current.extend(title_above);
        current.push(line);
        in_entry = true;
    }
    if in_entry {
        blocks.push(current);
    }

    blocks
        .iter()
        .filter_map(|block| {
            let category = categorize(&block.join("\n"), vocabulary)?;
            let summary = summarize(block)?;
            Some(ExperienceEntry { summary, category })
        })
        .collect()
}

/// First non-bulleted line of the block, joined with the date range when the
/// title and the dates sit on separate lines.
fn summarize(block: &[&str]) -> Option<String> {
    let mut plain = block.iter().copied().filter(|l| strip_list_marker(l).is_none());
    let first = plain.next().or_else(|| block.first().copied())?;

    let summary = if is_date_only(first) {
        match plain.find(|l| !contains_date_range(l)) {
            Some(title) => format!("{} ({})", title, find_date_range_text(first).unwrap_or(first)),
            None => first.to_string(),
        }
    } else if !contains_date_range(first) {
        match block.iter().find(|l| is_date_only(l)).and_then(|l| find_date_range_text(l)) {
            Some(dates) => format!("{first} ({dates})"),
            None => first.to_string(),
        }
    } else {
        first.to_string()
    };

    Some(truncate_with_ellipsis(&single_line(&summary), MAX_SNIPPET_CHARS))
}
