use crate::quality::QualityScorer;
use crate::variations::types::{ComparisonResult, VariationLabel, VariationSet};
use tracing::debug;

/// Scores variations and recommends the best one
#[derive(Debug, Clone, Copy, Default)]
pub struct VariationComparator {
    scorer: QualityScorer,
}

impl VariationComparator {
    pub fn new(scorer: QualityScorer) -> Self {
        Self { scorer }
    }

    /// Attach a quality report to each variation and pick the highest scorer.
    ///
    /// Only a strictly greater score displaces the current best, so ties go to
    /// the earliest label (concise, detailed, structured).
    pub fn compare(&self, original: &str, mut variations: VariationSet) -> ComparisonResult {
        let mut best: Option<(VariationLabel, f64)> = None;

        for (label, variation) in variations.iter_mut() {
            let report = self.scorer.score(&variation.text);
            let score = report.overall_score;
            variation.quality = Some(report);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*label, score));
            }
        }

        // An empty set still needs a label; concise is first in declared order.
        let best_label = best
            .map(|(label, _)| label)
            .unwrap_or(VariationLabel::Concise);

        debug!(
            original_chars = original.chars().count(),
            best = %best_label,
            "Compared variations"
        );

        ComparisonResult {
            reason: format!(
                "{} version has the highest quality score",
                best_label.capitalized()
            ),
            variations,
            best_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variations::types::Variation;

    fn set(texts: [&str; 3]) -> VariationSet {
        VariationLabel::ALL
            .iter()
            .zip(texts)
            .map(|(label, text)| {
                (
                    *label,
                    Variation::generated(*label, text.to_string(), "test".to_string()),
                )
            })
            .collect()
    }

    #[test]
    fn test_equal_scores_pick_concise() {
        let result = VariationComparator::default().compare("x", set(["same", "same", "same"]));

        assert_eq!(result.best_label, VariationLabel::Concise);
        assert_eq!(result.reason, "Concise version has the highest quality score");
    }

    #[test]
    fn test_highest_overall_score_wins() {
        let structured = "You must use this format:\n1. Context\n2. Task\n3. Output structure, \
                          with detailed sections and examples for every step of the plan.";
        let result = VariationComparator::default().compare(
            "x",
            set(["short", "a little longer prompt text", structured]),
        );

        assert_eq!(result.best_label, VariationLabel::Structured);
        assert_eq!(
            result.reason,
            "Structured version has the highest quality score"
        );
    }

    #[test]
    fn test_every_variation_gets_a_report() {
        let result = VariationComparator::default().compare("x", set(["a", "b c", "d e f"]));
        assert!(result.variations.values().all(|v| v.quality.is_some()));
    }
}
