use crate::quality::QualityReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Provider name recorded on a variation that fell back to the original prompt.
pub const FALLBACK_PROVIDER: &str = "fallback";

/// One of the three rewrite styles; declaration order is tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationLabel {
    Concise,
    Detailed,
    Structured,
}

impl VariationLabel {
    pub const ALL: [VariationLabel; 3] = [
        VariationLabel::Concise,
        VariationLabel::Detailed,
        VariationLabel::Structured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariationLabel::Concise => "concise",
            VariationLabel::Detailed => "detailed",
            VariationLabel::Structured => "structured",
        }
    }

    /// Instruction prefixed to the original prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            VariationLabel::Concise => "Make this prompt concise and direct (max 100 words):",
            VariationLabel::Detailed => "Expand this prompt with comprehensive details:",
            VariationLabel::Structured => "Rewrite this prompt with clear structure and sections:",
        }
    }

    pub fn max_output_tokens(&self) -> u32 {
        match self {
            VariationLabel::Concise => 500,
            VariationLabel::Detailed | VariationLabel::Structured => 1000,
        }
    }

    pub fn render_prompt(&self, prompt: &str) -> String {
        format!("{}\n{}", self.instruction(), prompt)
    }

    /// Label with its first letter upper-cased, e.g. "Concise".
    pub fn capitalized(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for VariationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the generator reacts when an orchestrator call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationPolicy {
    /// Only the labels whose call failed fall back to the original prompt.
    #[default]
    PerLabel,
    /// Any failure replaces all three labels with the original prompt.
    AllOrNothing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub label: VariationLabel,
    pub text: String,
    pub length: usize,
    pub provider_name: String,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

impl Variation {
    pub fn generated(label: VariationLabel, text: String, provider_name: String) -> Self {
        Self {
            label,
            length: text.chars().count(),
            text,
            provider_name,
            degraded: false,
            quality: None,
        }
    }

    /// Identity output used when generation for `label` is unavailable.
    pub fn fallback(label: VariationLabel, original: &str) -> Self {
        Self {
            label,
            text: original.to_string(),
            length: original.chars().count(),
            provider_name: FALLBACK_PROVIDER.to_string(),
            degraded: true,
            quality: None,
        }
    }
}

/// Three variations keyed by label
pub type VariationSet = BTreeMap<VariationLabel, Variation>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub variations: VariationSet,
    pub best_label: VariationLabel,
    pub reason: String,
}
