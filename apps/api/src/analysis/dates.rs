//! Date-range recognition for work-history lines.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `[month] YYYY <dash|to> [month] YYYY|present|current|now|date`, with an
/// optional `MM/` in front of either year. A range never spans a line break.
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \b
        (?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?[\ \t]+)?
        (?:\d{1,2}/)?
        (?P<start>(?:19|20)\d{2})
        [\ \t]*(?:[-–—]+|to|until)[\ \t]*
        (?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?[\ \t]+)?
        (?:\d{1,2}/)?
        (?P<end>(?:19|20)\d{2}|present|current|now|date)
        \b",
    )
    .unwrap()
});

/// Earliest start year accepted as a real employment date.
const MIN_YEAR: i32 = 1900;

/// One parsed range. `end_year` has already had "present" resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl DateRange {
    pub fn years(&self) -> u32 {
        (self.end_year - self.start_year).max(0) as u32
    }
}

pub fn contains_date_range(text: &str) -> bool {
    DATE_RANGE.is_match(text)
}

/// Returns the matched date-range text of the first range in `line`.
pub fn find_date_range_text(line: &str) -> Option<&str> {
    DATE_RANGE.find(line).map(|m| m.as_str())
}

/// True when the line holds a date range and nothing else of substance.
pub fn is_date_only(line: &str) -> bool {
    match DATE_RANGE.find(line) {
        Some(m) => {
            let rest = format!("{}{}", &line[..m.start()], &line[m.end()..]);
            !rest.chars().any(char::is_alphanumeric)
        }
        None => false,
    }
}

/// Every valid date range in `text`. Ranges with inverted or implausible years
/// are skipped.
pub fn parse_date_ranges(text: &str, reference_year: i32) -> Vec<DateRange> {
    DATE_RANGE
        .captures_iter(text)
        .filter_map(|caps| parse_captures(&caps, reference_year))
        .collect()
}

fn parse_captures(caps: &Captures<'_>, reference_year: i32) -> Option<DateRange> {
    let start_year: i32 = caps.name("start")?.as_str().parse().ok()?;
    let end_raw = caps.name("end")?.as_str();
    let end_year = match end_raw.to_lowercase().as_str() {
        "present" | "current" | "now" | "date" => reference_year,
        digits => digits.parse().ok()?,
    };

    let valid = start_year >= MIN_YEAR && end_year >= start_year && end_year <= reference_year;
    valid.then_some(DateRange {
        start_year,
        end_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_year_pairs() {
        let ranges = parse_date_ranges("2018 - 2021 Staff Nurse", 2025);
        assert_eq!(
            ranges,
            vec![DateRange {
                start_year: 2018,
                end_year: 2021
            }]
        );
    }

    #[test]
    fn test_month_year_pairs_and_present() {
        let ranges = parse_date_ranges("Senior Nurse, March 2021 – Present", 2025);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_year, 2021);
        assert_eq!(ranges[0].end_year, 2025);
    }

    #[test]
    fn test_abbreviated_months_and_to() {
        let ranges = parse_date_ranges("Jan. 2015 to Dec 2017", 2025);
        assert_eq!(ranges[0].years(), 2);
    }

    #[test]
    fn test_numeric_months() {
        let ranges = parse_date_ranges("01/2019 - 06/2020", 2025);
        assert_eq!(ranges[0].start_year, 2019);
        assert_eq!(ranges[0].end_year, 2020);
    }

    #[test]
    fn test_inverted_and_future_ranges_are_skipped() {
        assert!(parse_date_ranges("2021 - 2018", 2025).is_empty());
        assert!(parse_date_ranges("2024 - 2030", 2025).is_empty());
    }

    #[test]
    fn test_is_date_only() {
        assert!(is_date_only("2018 - 2021"));
        assert!(is_date_only("(Jan 2018 – Present)"));
        assert!(!is_date_only("2018 - 2021 Staff Nurse"));
        assert!(!is_date_only("Staff Nurse"));
    }

    #[test]
    fn test_range_does_not_span_lines() {
        let text = "BSc Nursing, University of Leeds 2017\n- 2019 Clinical excellence award";
        assert!(parse_date_ranges(text, 2025).is_empty());
        assert_eq!(find_date_range_text("Joined March\n2019 - 2021"), Some("2019 - 2021"));
        assert_eq!(parse_date_ranges("Jan 2019\t-\tMar 2021", 2025).len(), 1);
    }

    #[test]
    fn test_single_year_is_not_a_range() {
        assert!(!contains_date_range("Graduated in 2017"));
    }
}
