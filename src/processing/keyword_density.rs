//! Keyword coverage scoring with a per-keyword density cap

use crate::processing::text_processor::count_term_occurrences;
use log::debug;
use serde::{Deserialize, Serialize};

/// Share of the score earned by keyword presence
const MATCH_WEIGHT: f64 = 70.0;
/// Share of the score earned by repetition
const DENSITY_WEIGHT: f64 = 30.0;
const POINTS_PER_OCCURRENCE: usize = 5;
/// Three mentions saturate a keyword
const MAX_POINTS_PER_KEYWORD: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Default)]
pub struct KeywordDensityScorer;

impl KeywordDensityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score keyword coverage of `resume_text`.
    ///
    /// Presence of each keyword feeds a match ratio; repetitions add density
    /// points capped at `MAX_POINTS_PER_KEYWORD`, so stuffing a keyword past
    /// three mentions earns nothing. No keywords scores 0.
    pub fn score(&self, resume_text: &str, keywords: &[String]) -> KeywordScore {
        if keywords.is_empty() {
            return KeywordScore {
                score: 0.0,
                matched: Vec::new(),
                missing: Vec::new(),
            };
        }

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut density_points = 0usize;

        for keyword in keywords {
            let occurrences = count_term_occurrences(resume_text, keyword);
            if occurrences > 0 {
                matched.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
            density_points += (occurrences * POINTS_PER_OCCURRENCE).min(MAX_POINTS_PER_KEYWORD);
        }

        let count = keywords.len() as f64;
        let match_term = MATCH_WEIGHT * matched.len() as f64 / count;
        let density_term = DENSITY_WEIGHT * (density_points as f64 / count) / MAX_POINTS_PER_KEYWORD as f64;
        let score = (match_term + density_term).clamp(0.0, 100.0);

        debug!(
            "Keywords: {:.1} ({}/{} present, {} density points)",
            score,
            matched.len(),
            keywords.len(),
            density_points
        );

        KeywordScore { score, matched, missing }
    }
}
