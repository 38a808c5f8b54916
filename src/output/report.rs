//! Report assembled from one analysis run for display or export

use crate::processing::analyzer::{dedupe_and_cap, ATSScoreResult, ScoringWeights, MAX_SUGGESTIONS};
use crate::quality::QualityReport;
use crate::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the formatters render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub metadata: ReportMetadata,
    pub weights: ScoringWeights,
    pub ats_score: ATSScoreResult,
    pub quality: QualityReport,
    /// ATS suggestions followed by quality feedback, deduplicated and capped
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_file: String,
    pub job_file: String,
}

impl ScoreReport {
    pub fn new(result: AnalysisResult, weights: ScoringWeights, resume_file: &str, job_file: &str) -> Self {
        let suggestions = merge_suggestions(&result.ats_score, &result.quality);

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                job_file: job_file.to_string(),
            },
            weights,
            ats_score: result.ats_score,
            quality: result.quality,
            suggestions,
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.ats_score.overall_score
    }

    /// Short verdict for the overall score
    pub fn verdict(&self) -> &'static str {
        match self.overall_score() {
            80..=100 => "Strong match: apply with confidence",
            60..=79 => "Moderate match: tailor a few sections before applying",
            40..=59 => "Partial match: significant gaps to close",
            _ => "Weak match: this resume needs substantial work for this role",
        }
    }
}

/// ATS suggestions first, then bullet, language and impact feedback.
pub fn merge_suggestions(ats: &ATSScoreResult, quality: &QualityReport) -> Vec<String> {
    let combined: Vec<String> = ats
        .suggestions
        .iter()
        .chain(&quality.bullet_point_quality.feedback)
        .chain(&quality.language_quality.feedback)
        .chain(&quality.impact_analysis.suggestions)
        .cloned()
        .collect();

    dedupe_and_cap(combined, MAX_SUGGESTIONS)
}
