use crate::quality::scorer::round_to;
use serde::{Deserialize, Serialize};

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("blog", &["blog", "article", "post", "content", "seo"]),
    ("code", &["code", "function", "program", "script", "debug", "algorithm"]),
    ("business", &["business", "proposal", "marketing", "email", "product", "sales"]),
    ("academic", &["research", "essay", "paper", "thesis", "study", "analysis"]),
    ("creative", &["story", "character", "world", "creative", "fiction", "design"]),
];

const INTENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("content", &["blog", "article", "write", "content"]),
    ("code", &["code", "function", "program", "debug"]),
    ("analysis", &["analyze", "research", "study"]),
    ("creative", &["story", "creative", "design"]),
];

const GENERAL: &str = "general";
const POINTS_PER_KEYWORD: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentReport {
    pub intent: String,
    pub confidence: f64,
    pub tone: String,
}

/// Keyword-table prompt classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptClassifier;

impl PromptClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score every category and pick the best; earlier categories win ties.
    pub fn classify(&self, prompt: &str) -> Classification {
        let lower = prompt.to_lowercase();

        let mut best: Option<(&str, u32)> = None;
        for (category, keywords) in CATEGORY_KEYWORDS {
            let score = keywords.iter().filter(|kw| lower.contains(**kw)).count() as u32
                * POINTS_PER_KEYWORD;
            if score > best.map(|(_, s)| s).unwrap_or(0) {
                best = Some((*category, score));
            }
        }

        match best {
            Some((category, score)) => Classification {
                category: category.to_string(),
                confidence: round_to((score as f64 / 10.0).min(1.0), 2),
            },
            None => Classification {
                category: GENERAL.to_string(),
                confidence: 0.5,
            },
        }
    }

    /// First intent whose keywords appear in the prompt.
    pub fn detect_intent(&self, prompt: &str) -> IntentReport {
        let lower = prompt.to_lowercase();

        INTENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(*kw)))
            .map(|(intent, _)| IntentReport {
                intent: intent.to_string(),
                confidence: 0.8,
                tone: "professional".to_string(),
            })
            .unwrap_or_else(|| IntentReport {
                intent: GENERAL.to_string(),
                confidence: 0.5,
                tone: "neutral".to_string(),
            })
    }
}
