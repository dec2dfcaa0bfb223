//! Recommended highlights — short suggestions for what the candidate should
//! emphasize, derived from the assembled comparison.

use crate::analysis::models::{ExperienceCategory, ExperienceEntry, MatchRecord};
use crate::analysis::text::lowercase_initial;

/// Number of matched requirements turned into "give examples" highlights.
const MATCHED_HIGHLIGHTS: usize = 2;

const CATEGORY_HIGHLIGHTS: &[(ExperienceCategory, &str)] = &[
    (
        ExperienceCategory::Clinical,
        "Highlight your clinical experience and the difference it made to patients",
    ),
    (
        ExperienceCategory::NonClinical,
        "Explain how the skills from your wider work experience transfer to this role",
    ),
    (
        ExperienceCategory::Administrative,
        "Mention your administrative experience and how you keep work organised",
    ),
];

const PROBLEM_SOLVING_HIGHLIGHT: &str =
    "Include an example of a problem you solved and the outcome you achieved";

pub fn recommend_highlights(
    value_tags: &[String],
    matched: &[MatchRecord],
    experience: &[ExperienceEntry],
) -> Vec<String> {
    let mut highlights = Vec::new();

    match value_tags {
        [] => {}
        [only] => highlights.push(format!("Show how you demonstrate the value of {only}")),
        [first, second, ..] => highlights.push(format!(
            "Show how you demonstrate the values of {first} and {second}"
        )),
    }

    for record in matched.iter().take(MATCHED_HIGHLIGHTS) {
        highlights.push(format!(
            "Give examples of {}",
            lowercase_initial(record.requirement.body())
        ));
    }

    for (category, text) in CATEGORY_HIGHLIGHTS {
        if experience.iter().any(|e| e.category == *category) {
            highlights.push(text.to_string());
        }
    }

    highlights.push(PROBLEM_SOLVING_HIGHLIGHT.to_string());
    highlights
}
