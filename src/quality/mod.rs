pub mod classifier;
pub mod scorer;

pub use classifier::{Classification, IntentReport, PromptClassifier};
pub use scorer::{
    Dimension, Grade, QualityLabel, QualityReport, QualityScorer, ScoreSummary, Suggestion,
};
