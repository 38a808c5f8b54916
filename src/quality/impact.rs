//! Quantifiable impact extraction

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Metrics needed before results count as quantified
const MIN_QUANTIFIED: usize = 2;
/// Below this many metrics the report asks for more
const TARGET_METRICS: usize = 3;

const NUMBER: &str = r"\d+(?:[.,]\d+)*";
const UNIT: &str = r"(?:%|ms\b|s\b|sec\b|seconds?\b|minutes?\b|mins?\b|hours?\b|hrs?\b|days?\b|weeks?\b|[kmb]\b|x\b)";

/// One regex per metric shape, each anchored on an outcome verb
static IMPACT_TEMPLATES: Lazy<Vec<Regex>> = Lazy::new(|| {
    let templates = [
        // percentage change
        r"(?i)\b(?:increased|decreased|reduced|improved|grew|boosted|cut|raised|lowered|accelerated|saved|lifted)\b[^.\n]{0,60}?\b\d+(?:\.\d+)?\s?%".to_string(),
        // money
        format!(
            r"(?i)\b(?:saved|generated|earned|raised|secured|managed|delivered|reduced costs by|cut costs by|closed)\b[^.\n]{{0,40}}?\${}(?:\s?(?:[kmb]|thousand|million|billion)\b)?",
            NUMBER
        ),
        // team size
        r"(?i)\b(?:led|managed|supervised|mentored|coached|hired|built|grew)\b[^.\n]{0,30}?\b(?:team|staff|group)\s+of\s+\d+\b".to_string(),
        r"(?i)\b(?:led|managed|supervised|mentored|coached|hired)\s+\d+\+?\s+(?:engineers|developers|people|employees|staff|members|reports|analysts|designers)\b".to_string(),
        // before and after
        format!(
            r"(?i)\b(?:reduced|cut|decreased|increased|improved|grew|raised|lowered|boosted|brought)\b[^.\n]{{0,40}}?\bfrom\s+\$?{n}\s?{u}?\s+to\s+\$?{n}\s?{u}?",
            n = NUMBER,
            u = UNIT
        ),
        // multiplier
        r"(?i)\b(?:increased|improved|accelerated|boosted|grew|sped up|scaled)\b[^.\n]{0,40}?\b\d+(?:\.\d+)?x\b".to_string(),
    ];

    templates
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Impact template is valid"))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub has_quantifiable_results: bool,
    /// Metric phrases in document order
    pub examples: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Extract quantified achievements from `text`.
///
/// Overlapping matches from different templates are reported once, keeping
/// the earliest and then longest span.
pub fn analyze_impact(text: &str) -> ImpactAnalysis {
    let mut spans: Vec<(usize, usize)> = IMPACT_TEMPLATES
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut examples = Vec::new();
    let mut seen = HashSet::new();
    let mut last_end = 0;
    for (start, end) in spans {
        if start < last_end {
            continue;
        }
        last_end = end;
        let phrase = text[start..end].trim().to_string();
        if seen.insert(phrase.to_lowercase()) {
            examples.push(phrase);
        }
    }

    let mut suggestions = Vec::new();
    if examples.len() < TARGET_METRICS {
        suggestions.push(
            "Add numbers to your achievements: percentages, revenue or savings, and team sizes.".to_string(),
        );
        suggestions.push(
            "Show change over time, e.g. \"reduced page load from 4s to 1s\" or \"grew signups 3x\".".to_string(),
        );
    }

    ImpactAnalysis {
        has_quantifiable_results: examples.len() >= MIN_QUANTIFIED,
        examples,
        suggestions,
    }
}
