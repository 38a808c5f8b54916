//! Heuristic resume quality analysis

pub mod analyzer;
pub mod bullets;
pub mod impact;
pub mod language;
pub mod lexicon;

use serde::{Deserialize, Serialize};

pub use analyzer::{QualityAnalyzer, QualityReport};
pub use impact::ImpactAnalysis;

/// A 0..=100 score with the reasons it lost points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub score: f64,
    pub feedback: Vec<String>,
}
