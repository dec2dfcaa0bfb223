//! Small text helpers shared by the extraction stages.

/// Maximum length of requirement texts, experience summaries and evidence snippets.
pub const MAX_SNIPPET_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

const BULLET_MARKERS: &[char] = &['•', '-', '*', '▪', '●', '◦', '·', '–', '—', '‣'];

/// Trims `text` and, when it exceeds `max_chars`, cuts it so that the result
/// including a trailing ellipsis is exactly `max_chars` characters long.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = trimmed.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Collapses all runs of whitespace (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits on `.`, `!`, `?` and line breaks, for documents whose lines are
/// fragments without terminal punctuation. Returns trimmed, non-empty pieces.
pub fn split_sentences_and_lines(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// If `line` is a bullet or numbered list item, returns the item text without
/// its marker.
///
/// Recognized markers: bullet glyphs (`•`, `-`, `*`, ...), `1.`, `1)`, `(1)`,
/// `a)` and `(a)`.
pub fn strip_list_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    if BULLET_MARKERS.contains(&first) {
        let rest = chars.as_str();
        // "-2021" style fragments are not bullets
        if first == '-' && rest.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        return Some(rest.trim());
    }

    let body = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let marker_len = body
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .or_else(|| {
            // single letter enumerator: "a)" or "(a)"
            let c = body.chars().next()?;
            (c.is_ascii_alphabetic() && body[c.len_utf8()..].starts_with(')')).then_some(c.len_utf8())
        })?;

    let rest = &body[marker_len..];
    let digits_only = body[..marker_len].chars().all(|c| c.is_ascii_digit());
    // Four-digit numbers are years, not enumerators.
    if digits_only && marker_len > 2 {
        return None;
    }
    let after = rest
        .strip_prefix(')')
        .or_else(|| if digits_only { rest.strip_prefix('.') } else { None })?;
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }
    Some(after.trim())
}

/// Counts occurrences of `term` in the lowercase `haystack` that begin on a
/// word boundary. Suffixes are allowed so that "patient" also counts "patients".
pub fn count_term(haystack_lower: &str, term: &str) -> usize {
    let term = term.trim();
    if term.is_empty() {
        return 0;
    }
    haystack_lower
        .match_indices(term)
        .filter(|(idx, _)| {
            haystack_lower[..*idx]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
        .count()
}

/// Heading text normalized for comparison: trimmed, lowercased, trailing
/// colon and surrounding decoration removed.
pub fn normalize_heading(line: &str) -> String {
    line.trim()
        .trim_matches(|c: char| c == ':' || c == '#' || c == '*' || c == '=' || c.is_whitespace())
        .to_lowercase()
}

/// "Experience of audit" → "experience of audit"; acronyms such as "NMC" are kept.
pub fn lowercase_initial(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && !second.is_uppercase() => {
            first.to_lowercase().chain(text[first.len_utf8()..].chars()).collect()
        }
        _ => text.to_string(),
    }
}
