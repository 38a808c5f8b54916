//! Resume scorer library
//!
//! Turns a resume document into a [`ParsedResume`], scores it against a
//! [`JobDescriptionInput`] and runs heuristic quality checks. Everything in
//! the scoring core is a deterministic function of its inputs.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod quality;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
pub use processing::analyzer::{ATSScoreResult, AnalysisEngine, ScoringWeights};
pub use processing::document::{ContactInfo, JobDescriptionInput, ParsedResume};
pub use quality::{QualityAnalyzer, QualityReport};

use processing::segmenter::SectionSegmenter;
use serde::{Deserialize, Serialize};

/// Result of one `analyze` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: ATSScoreResult,
    pub quality: QualityReport,
}

/// Extract and segment a document.
///
/// `mime_type` selects the decoder; `None` means already-decoded UTF-8 text.
pub fn parse(document: &[u8], mime_type: Option<&str>) -> Result<ParsedResume> {
    let text = input::text_extractor::extract(document, mime_type)?;
    Ok(parse_text(&text))
}

/// Segment pasted plain text. Never fails.
pub fn parse_text(text: &str) -> ParsedResume {
    SectionSegmenter::new().segment(text)
}

/// Score `resume` against `job` with the default weights.
pub fn analyze(resume: &ParsedResume, job: &JobDescriptionInput) -> AnalysisResult {
    analyze_with(&AnalysisEngine::default(), resume, job)
}

/// Score with a caller-configured engine; quality runs after the ATS score.
pub fn analyze_with(engine: &AnalysisEngine, resume: &ParsedResume, job: &JobDescriptionInput) -> AnalysisResult {
    let ats_score = engine.calculate(resume, job);
    let quality = QualityAnalyzer::new().analyze(resume, &ats_score);
    AnalysisResult { ats_score, quality }
}
