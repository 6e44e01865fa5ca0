pub mod comparator;
pub mod generator;
pub mod types;

pub use comparator::VariationComparator;
pub use generator::{VariationConfig, VariationGenerator};
pub use types::*;
