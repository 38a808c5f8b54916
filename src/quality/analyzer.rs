//! Combines the quality checks with the ATS result into strengths and weaknesses

use crate::processing::analyzer::ATSScoreResult;
use crate::processing::document::ParsedResume;
use crate::quality::bullets::analyze_bullets;
use crate::quality::impact::{analyze_impact, ImpactAnalysis};
use crate::quality::language::{LanguageAnalyzer, LanguageStats};
use crate::quality::QualityScore;
use log::debug;
use serde::{Deserialize, Serialize};

const BROAD_SKILLS: usize = 10;
const FEW_SKILLS: usize = 5;
const STRONG: u8 = 80;
const ADEQUATE: u8 = 60;
const WEAK_SKILLS: u8 = 50;
const WEAK_FORMATTING: u8 = 70;
const STRONG_QUALITY: f64 = 80.0;
const WEAK_QUALITY: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub bullet_point_quality: QualityScore,
    pub language_quality: QualityScore,
    pub language_stats: LanguageStats,
    pub impact_analysis: ImpactAnalysis,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// One-paragraph verdict
    pub summary: String,
}

pub struct QualityAnalyzer {
    language_analyzer: LanguageAnalyzer,
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self {
            language_analyzer: LanguageAnalyzer::new(),
        }
    }

    /// Run every quality check. Reads `resume` and `ats_score` only.
    pub fn analyze(&self, resume: &ParsedResume, ats_score: &ATSScoreResult) -> QualityReport {
        let bullet_point_quality = analyze_bullets(resume);
        let (language_quality, language_stats) = self.language_analyzer.analyze(&resume.content);
        let impact_analysis = analyze_impact(&resume.content);

        let strengths = strengths(resume, ats_score, &bullet_point_quality, &language_quality, &impact_analysis);
        let weaknesses = weaknesses(resume, ats_score, &bullet_point_quality, &language_quality, &impact_analysis);
        let summary = summarize(ats_score, &strengths, &weaknesses);

        debug!(
            "Quality: bullets {:.0}, language {:.0}, {} metrics",
            bullet_point_quality.score,
            language_quality.score,
            impact_analysis.examples.len()
        );

        QualityReport {
            bullet_point_quality,
            language_quality,
            language_stats,
            impact_analysis,
            strengths,
            weaknesses,
            summary,
        }
    }
}

fn strengths(
    resume: &ParsedResume,
    ats: &ATSScoreResult,
    bullets: &QualityScore,
    language: &QualityScore,
    impact: &ImpactAnalysis,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if resume.skills.len() >= BROAD_SKILLS {
        strengths.push(format!("Broad skill set ({} skills listed)", resume.skills.len()));
    }
    if ats.overall_score >= STRONG {
        strengths.push("Strong overall match for this job".to_string());
    }
    if ats.skills_score >= STRONG {
        strengths.push("Covers the required skills well".to_string());
    }
    if ats.keywords_score >= STRONG {
        strengths.push("Good use of the job's keywords".to_string());
    }
    if ats.experience_score >= STRONG {
        strengths.push("Experience closely mirrors the job description".to_string());
    }
    if bullets.score >= STRONG_QUALITY {
        strengths.push("Well-structured bullet points".to_string());
    }
    if language.score >= STRONG_QUALITY {
        strengths.push("Clear, direct language".to_string());
    }
    if impact.has_quantifiable_results {
        strengths.push(format!(
            "Quantifies achievements ({} metrics found)",
            impact.examples.len()
        ));
    }

    strengths
}

fn weaknesses(
    resume: &ParsedResume,
    ats: &ATSScoreResult,
    bullets: &QualityScore,
    language: &QualityScore,
    impact: &ImpactAnalysis,
) -> Vec<String> {
    let mut weaknesses = Vec::new();

    if ats.overall_score < ADEQUATE {
        weaknesses.push("Low overall match for this job".to_string());
    }
    if ats.skills_score < WEAK_SKILLS {
        weaknesses.push(format!(
            "Missing key required skills ({} missing)",
            ats.missing_skills.len()
        ));
    }
    if ats.experience_score < ADEQUATE {
        weaknesses.push("Experience does not reflect the job's focus".to_string());
    }
    if ats.formatting_score < WEAK_FORMATTING {
        weaknesses.push("Resume structure is incomplete".to_string());
    }
    if resume.skills.len() < FEW_SKILLS {
        weaknesses.push("Few skills listed".to_string());
    }
    if bullets.score < WEAK_QUALITY {
        weaknesses.push("Bullet points lack action, context or results".to_string());
    }
    if language.score < WEAK_QUALITY {
        weaknesses.push("Wording weakens the resume".to_string());
    }
    if !impact.has_quantifiable_results {
        weaknesses.push("Few quantified achievements".to_string());
    }

    weaknesses
}

fn summarize(ats: &ATSScoreResult, strengths: &[String], weaknesses: &[String]) -> String {
    let verdict = if ats.overall_score >= STRONG {
        "Strong match"
    } else if ats.overall_score >= ADEQUATE {
        "Moderate match"
    } else {
        "Weak match"
    };

    let mut summary = format!("{} ({}/100).", verdict, ats.overall_score);
    if let Some(best) = strengths.first() {
        summary.push_str(&format!(" Main strength: {}.", best.to_lowercase()));
    }
    match weaknesses.first() {
        Some(worst) => summary.push_str(&format!(
            " Focus first on: {}. {} area(s) to improve in total.",
            worst.to_lowercase(),
            weaknesses.len()
        )),
        None => summary.push_str(" No major weaknesses found."),
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::document::JobDescriptionInput;

    fn strong_resume() -> ParsedResume {
        let experience = "Senior Engineer, Acme 2019 - 2023\n\
            • Led a team of 6 engineers across two product lines, resulting in 30% faster releases\n\
            • Reduced cloud costs from $40k to $25k per month using spot instances\n\
            • Improved API throughput 4x while migrating services to Kubernetes";
        let skills: Vec<String> = [
            "Rust", "Go", "Python", "Kubernetes", "Docker", "AWS", "Terraform", "PostgreSQL", "Redis", "Kafka",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        ParsedResume {
            content: format!("Skills: {}\nExperience\n{}\nEducation\nBSc Computer Science", skills.join(", "), experience),
            skills,
            experience: vec![experience.to_string()],
            education: vec!["BSc Computer Science".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_resume_strengths() {
        let resume = strong_resume();
        let job = JobDescriptionInput::new("Platform engineer with Kubernetes and AWS")
            .with_required_skills(["Kubernetes", "AWS"]);
        let ats = AnalysisEngine::default().calculate(&resume, &job);
        let report = QualityAnalyzer::new().analyze(&resume, &ats);

        assert!(report.strengths.iter().any(|s| s.starts_with("Broad skill set")));
        assert!(report.impact_analysis.has_quantifiable_results);
        assert!(report.strengths.iter().any(|s| s.starts_with("Quantifies achievements")));
        assert!(report.bullet_point_quality.score >= 80.0);
    }

    #[test]
    fn test_empty_resume_weaknesses() {
        let resume = ParsedResume::default();
        let job = JobDescriptionInput::new("Platform engineer").with_required_skills(["Kubernetes"]);
        let ats = AnalysisEngine::default().calculate(&resume, &job);
        let report = QualityAnalyzer::new().analyze(&resume, &ats);

        assert!(report.weaknesses.contains(&"Low overall match for this job".to_string()));
        assert!(report.weaknesses.contains(&"Few skills listed".to_string()));
        assert!(report.summary.starts_with("Weak match"));
    }

    #[test]
    fn test_analyze_does_not_mutate_inputs() {
        let resume = strong_resume();
        let job = JobDescriptionInput::new("Rust engineer").with_required_skills(["Rust"]);
        let ats = AnalysisEngine::default().calculate(&resume, &job);
        let (resume_before, ats_before) = (resume.clone(), ats.clone());

        let first = QualityAnalyzer::new().analyze(&resume, &ats);
        let second = QualityAnalyzer::new().analyze(&resume, &ats);

        assert_eq!(resume, resume_before);
        assert_eq!(ats, ats_before);
        assert_eq!(first, second);
    }
}
