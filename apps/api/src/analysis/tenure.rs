//! Tenure estimate — total years of experience from date ranges, with a
//! fallback to an explicit "N years experience" statement.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::analysis::dates::parse_date_ranges;

static YEARS_OF_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<years>\d{1,2})\s*\+?\s*(?:years?|yrs?)\.?\s+(?:of\s+)?(?:[a-z]+\s+)?experience")
        .unwrap()
});

/// Sums `end - start` over every valid date range in the profile. Overlapping
/// ranges are counted in full. Without any valid range, the first
/// "N(+) years (of) experience" phrase is used; otherwise 0.
pub fn estimate_tenure(profile: &str, reference_year: i32) -> u32 {
    let ranges = parse_date_ranges(profile, reference_year);
    if !ranges.is_empty() {
        let total = ranges.iter().map(|r| r.years()).sum();
        debug!(ranges = ranges.len(), total, "Tenure from date ranges");
        return total;
    }

    let stated = YEARS_OF_EXPERIENCE
        .captures(profile)
        .and_then(|caps| caps.name("years"))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);
    debug!(stated, "Tenure from stated years of experience");
    stated
}
