//! Progress reporting for one analysis run.

use serde::{Deserialize, Serialize};

/// Caller-supplied progress sink: `(stage label, percent complete)`.
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(&str, u8) + Send);

/// Fixed checkpoints of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    TaggingValues,
    ExtractingRequirements,
    ExtractingSkills,
    SegmentingExperience,
    MatchingRequirements,
    BuildingHighlights,
    Complete,
    Failed,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Validating => "Validating documents",
            Stage::TaggingValues => "Detecting organisational values",
            Stage::ExtractingRequirements => "Extracting requirements",
            Stage::ExtractingSkills => "Extracting skills",
            Stage::SegmentingExperience => "Analysing experience",
            Stage::MatchingRequirements => "Matching requirements",
            Stage::BuildingHighlights => "Preparing highlights",
            Stage::Complete => "Analysis complete",
            Stage::Failed => "Analysis failed",
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            Stage::Validating => 5,
            Stage::TaggingValues => 15,
            Stage::ExtractingRequirements => 25,
            Stage::ExtractingSkills => 40,
            Stage::SegmentingExperience => 55,
            Stage::MatchingRequirements => 70,
            Stage::BuildingHighlights => 90,
            Stage::Complete | Stage::Failed => 100,
        }
    }
}

/// A recorded progress notification, as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: String,
    pub percent: u8,
}

/// Wraps the optional callback and enforces its contract: percentages never
/// go down, and 100 is delivered exactly once.
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
    last_percent: u8,
    finished: bool,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(callback: Option<ProgressCallback<'a>>) -> Self {
        Self {
            callback,
            last_percent: 0,
            finished: false,
        }
    }

    pub fn stage(&mut self, stage: Stage) {
        self.report(stage.label(), stage.percent());
    }

    pub fn report(&mut self, label: &str, percent: u8) {
        if self.finished {
            return;
        }
        let percent = percent.min(100).max(self.last_percent);
        self.last_percent = percent;
        self.finished = percent == 100;
        if let Some(callback) = self.callback.as_mut() {
            callback(label, percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_percentages_are_non_decreasing() {
        let stages = [
            Stage::Validating,
            Stage::TaggingValues,
            Stage::ExtractingRequirements,
            Stage::ExtractingSkills,
            Stage::SegmentingExperience,
            Stage::MatchingRequirements,
            Stage::BuildingHighlights,
            Stage::Complete,
        ];
        let percents: Vec<u8> = stages.iter().map(|s| s.percent()).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
        assert_eq!(percents.last(), Some(&100));
    }

    #[test]
    fn test_reporter_clamps_backwards_steps() {
        let mut seen = Vec::new();
        let mut callback = |_: &str, p: u8| seen.push(p);
        let mut reporter = ProgressReporter::new(Some(&mut callback));
        reporter.report("a", 40);
        reporter.report("b", 20);
        reporter.report("c", 100);
        drop(reporter);
        assert_eq!(seen, vec![40, 40, 100]);
    }

    #[test]
    fn test_reporter_delivers_completion_once() {
        let mut completions = 0;
        let mut callback = |_: &str, p: u8| {
            if p == 100 {
                completions += 1;
            }
        };
        let mut reporter = ProgressReporter::new(Some(&mut callback));
        reporter.stage(Stage::Complete);
        reporter.stage(Stage::Failed);
        assert!(reporter.finished);
        drop(reporter);
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_reporter_without_callback() {
        let mut reporter = ProgressReporter::new(None);
        reporter.stage(Stage::Validating);
        reporter.stage(Stage::Complete);
        assert!(reporter.finished);
        assert_eq!(reporter.last_percent, 100);
    }
}
