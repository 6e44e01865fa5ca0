//! Deterministic heuristic prompt scoring.
//!
//! Two views over the same text:
//! - [`QualityScorer::summarize`]: a single weighted score out of 10 with a
//!   percentage and a quality label, used to compare an original prompt with
//!   its enhanced rewrite.
//! - [`QualityScorer::score`]: the six-dimension heatmap with a letter grade
//!   and table-driven suggestions.
//!
//! Both are pure functions of the input and never fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const SPECIFICITY_KEYWORDS: &[&str] = &["specific", "detailed", "format", "tone", "audience", "length"];
const CONTEXT_KEYWORDS: &[&str] = &["context", "background", "about", "purpose"];
const CONSTRAINT_KEYWORDS: &[&str] = &["must", "should", "avoid", "requirement"];
const STRUCTURE_MARKERS: &[char] = &['\n', ':', '-', '•'];

const HEATMAP_CONSTRAINT_KEYWORDS: &[&str] = &["must", "should"];
const HEATMAP_FORMAT_KEYWORDS: &[&str] = &["format", "structure"];

/// Scores below this emit a suggestion for the dimension.
pub const SUGGESTION_THRESHOLD: f64 = 5.0;

/// Named heatmap dimension; ordering is the report's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Clarity,
    Specificity,
    Structure,
    Context,
    Constraints,
    OutputFormat,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Clarity,
        Dimension::Specificity,
        Dimension::Structure,
        Dimension::Context,
        Dimension::Constraints,
        Dimension::OutputFormat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Clarity => "clarity",
            Dimension::Specificity => "specificity",
            Dimension::Structure => "structure",
            Dimension::Context => "context",
            Dimension::Constraints => "constraints",
            Dimension::OutputFormat => "output_format",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade over the heatmap's overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Fixed bands; each boundary belongs to the higher grade.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Grade::A
        } else if score >= 7.0 {
            Grade::B
        } else if score >= 5.0 {
            Grade::C
        } else if score >= 3.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Label attached to a [`ScoreSummary`] percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLabel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            QualityLabel::Excellent
        } else if percentage >= 75.0 {
            QualityLabel::Good
        } else if percentage >= 60.0 {
            QualityLabel::Fair
        } else {
            QualityLabel::Poor
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub issue: String,
    pub fix: String,
}

/// Six-dimension heatmap of a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub overall_score: f64,
    pub grade: Grade,
    pub metrics: BTreeMap<Dimension, f64>,
    pub suggestions: Vec<Suggestion>,
}

impl QualityReport {
    pub fn metric(&self, dimension: Dimension) -> f64 {
        self.metrics.get(&dimension).copied().unwrap_or_default()
    }
}

/// Single aggregate score out of 10
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: f64,
    pub percentage: f64,
    pub quality: QualityLabel,
}

struct SuggestionRule {
    dimension: Dimension,
    category: &'static str,
    issue: &'static str,
    fix: &'static str,
}

const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        dimension: Dimension::Clarity,
        category: "Clarity",
        issue: "Prompt is too vague",
        fix: "Add specific details about what you want",
    },
    SuggestionRule {
        dimension: Dimension::Specificity,
        category: "Specificity",
        issue: "Lacks specific requirements",
        fix: "Specify tone, length, and format",
    },
];

/// Stateless prompt quality scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the six-dimension heatmap report for `text`.
    pub fn score(&self, text: &str) -> QualityReport {
        let lower = text.to_lowercase();
        let chars = text.chars().count() as f64;
        let words = text.split_whitespace().count() as f64;

        let raw = [
            (Dimension::Clarity, chars / 15.0),
            (Dimension::Specificity, words * 0.4),
            (Dimension::Structure, if text.contains('\n') { 8.0 } else { 4.0 }),
            (Dimension::Context, if chars > 100.0 { 7.0 } else { 3.0 }),
            (
                Dimension::Constraints,
                if contains_any(&lower, HEATMAP_CONSTRAINT_KEYWORDS) { 6.0 } else { 3.0 },
            ),
            (
                Dimension::OutputFormat,
                if contains_any(&lower, HEATMAP_FORMAT_KEYWORDS) { 7.0 } else { 4.0 },
            ),
        ];

        let clamped: Vec<(Dimension, f64)> = raw
            .iter()
            .map(|(dimension, value)| (*dimension, value.clamp(0.0, 10.0)))
            .collect();

        let mean = clamped.iter().map(|(_, value)| value).sum::<f64>() / clamped.len() as f64;
        let overall_score = round_to(mean, 1);

        let suggestions = SUGGESTION_RULES
            .iter()
            .filter(|rule| {
                clamped
                    .iter()
                    .any(|(dimension, value)| *dimension == rule.dimension && *value < SUGGESTION_THRESHOLD)
            })
            .map(|rule| Suggestion {
                category: rule.category.to_string(),
                issue: rule.issue.to_string(),
                fix: rule.fix.to_string(),
            })
            .collect();

        QualityReport {
            overall_score,
            grade: Grade::from_score(overall_score),
            metrics: clamped
                .into_iter()
                .map(|(dimension, value)| (dimension, round_to(value, 1)))
                .collect(),
            suggestions,
        }
    }

    /// Compute the weighted single-number summary for `text`.
    pub fn summarize(&self, text: &str) -> ScoreSummary {
        let lower = text.to_lowercase();
        let length = text.chars().count();
        let mut score = 0.0;

        if (50..=500).contains(&length) {
            score += 2.0;
        } else if length > 20 {
            score += 1.0;
        }

        let specificity_hits = SPECIFICITY_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count();
        score += (specificity_hits as f64 * 0.5).min(3.0);

        if text.contains(STRUCTURE_MARKERS) {
            score += 1.5;
        }
        if contains_any(&lower, CONTEXT_KEYWORDS) {
            score += 1.0;
        }
        if contains_any(&lower, CONSTRAINT_KEYWORDS) {
            score += 1.0;
        }

        let total = round_to(score.clamp(0.0, 10.0), 2);
        let percentage = round_to(total / 10.0 * 100.0, 1);

        ScoreSummary {
            total,
            percentage,
            quality: QualityLabel::from_percentage(percentage),
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
