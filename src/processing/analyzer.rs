//! Composite ATS scoring: combines skill, experience, keyword and formatting scores

use crate::error::{Result, ResumeScorerError};
use crate::processing::ats_matcher::partition_skills;
use crate::processing::document::{JobDescriptionInput, ParsedResume};
use crate::processing::keyword_density::KeywordDensityScorer;
use crate::processing::relevance::RelevanceScorer;
use crate::processing::structure::StructureScorer;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Allowed drift of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
pub const MAX_SUGGESTIONS: usize = 10;

const REQUIRED_SKILLS_POINTS: f64 = 80.0;
const PREFERRED_SKILLS_POINTS: f64 = 20.0;
const EXPERIENCE_THRESHOLD: f64 = 60.0;
const KEYWORDS_THRESHOLD: f64 = 70.0;
const STRONG_MATCH_THRESHOLD: f64 = 80.0;
/// Missing items named per suggestion
const TOP_MISSING: usize = 5;

/// Weights of the four components in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub keywords: f64,
    pub formatting: f64,
}

impl ScoringWeights {
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        skills: 0.40,
        experience: 0.30,
        keywords: 0.20,
        formatting: 0.10,
    };

    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.keywords + self.formatting
    }

    /// Weights must be non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let all = [self.skills, self.experience, self.keywords, self.formatting];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ResumeScorerError::Configuration(format!(
                "Scoring weights must be non-negative numbers: {:?}",
                self
            )));
        }
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ResumeScorerError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Score of one factor and how its input set splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Unrounded component values the overall score is computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub skills: f64,
    pub experience: f64,
    pub keywords: f64,
    pub formatting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ATSScoreResult {
    /// 0..=100, weighted sum of the unrounded components rounded once
    pub overall_score: u8,
    pub skills_score: u8,
    pub experience_score: u8,
    pub keywords_score: u8,
    pub formatting_score: u8,
    pub component_scores: ComponentScores,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_preferred_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Highest-weighted job description terms
    pub relevant_terms: Vec<String>,
    pub formatting_issues: Vec<String>,
    /// Highest priority first
    pub suggestions: Vec<String>,
}

/// Combines the component scorers under fixed weights.
pub struct AnalysisEngine {
    weights: ScoringWeights,
    relevance_scorer: RelevanceScorer,
    keyword_scorer: KeywordDensityScorer,
    structure_scorer: StructureScorer,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::DEFAULT,
            relevance_scorer: RelevanceScorer::new(),
            keyword_scorer: KeywordDensityScorer::new(),
            structure_scorer: StructureScorer::new(),
        }
    }
}

impl AnalysisEngine {
    /// Create an engine with a custom weight table, rejecting tables that do
    /// not sum to 1.0.
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            ..Self::default()
        })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `resume` against `job`.
    ///
    /// Never fails: empty inputs produce zero components and suggestions
    /// explaining what is missing.
    pub fn calculate(&self, resume: &ParsedResume, job: &JobDescriptionInput) -> ATSScoreResult {
        if job.description.trim().is_empty() {
            warn!("Job description is empty; experience relevance will score 0");
        }

        let skills = self.score_skills(resume, job);
        let (matched_preferred, _) = partition_skills(&job.preferred_skills, &resume.skills);
        let relevance = self.relevance_scorer.score(resume, &job.description);
        let keywords = self.keyword_scorer.score(&resume.content, &job.keywords);
        let formatting = self.structure_scorer.score(resume);

        let components = ComponentScores {
            skills: skills.score,
            experience: relevance.score,
            keywords: keywords.score,
            formatting: formatting.score,
        };
        let overall = self.overall_score(&components);

        debug!(
            "ATS score {} (skills {:.1}, experience {:.1}, keywords {:.1}, formatting {:.1})",
            overall, components.skills, components.experience, components.keywords, components.formatting
        );

        let suggestions = Self::generate_suggestions(
            &components,
            &skills.missing,
            &keywords.missing,
            &formatting.issues,
        );

        ATSScoreResult {
            overall_score: overall,
            skills_score: to_display_score(components.skills),
            experience_score: to_display_score(components.experience),
            keywords_score: to_display_score(components.keywords),
            formatting_score: to_display_score(components.formatting),
            component_scores: components,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            matched_preferred_skills: matched_preferred,
            matched_keywords: keywords.matched,
            missing_keywords: keywords.missing,
            relevant_terms: relevance.relevant_terms,
            formatting_issues: formatting.issues,
            suggestions,
        }
    }

    /// Required ratio earns up to 80 points, preferred ratio up to 20.
    pub fn score_skills(&self, resume: &ParsedResume, job: &JobDescriptionInput) -> ComponentScore {
        let (matched, missing) = partition_skills(&job.required_skills, &resume.skills);
        let (matched_preferred, _) = partition_skills(&job.preferred_skills, &resume.skills);

        let required_ratio = ratio(matched.len(), job.required_skills.len());
        let preferred_ratio = ratio(matched_preferred.len(), job.preferred_skills.len());
        let score = (required_ratio * REQUIRED_SKILLS_POINTS + preferred_ratio * PREFERRED_SKILLS_POINTS).min(100.0);

        ComponentScore { score, matched, missing }
    }

    /// Weighted sum of the unrounded components, rounded once.
    pub fn overall_score(&self, components: &ComponentScores) -> u8 {
        let weighted = components.skills * self.weights.skills
            + components.experience * self.weights.experience
            + components.keywords * self.weights.keywords
            + components.formatting * self.weights.formatting;
        to_display_score(weighted)
    }

    /// Order: skills, experience, keywords, formatting, general.
    fn generate_suggestions(
        components: &ComponentScores,
        missing_skills: &[String],
        missing_keywords: &[String],
        formatting_issues: &[String],
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !missing_skills.is_empty() {
            suggestions.push(format!(
                "Add these required skills if you have them: {}",
                top_items(missing_skills)
            ));
        }

        if components.experience < EXPERIENCE_THRESHOLD {
            suggestions.push(
                "Tailor your experience descriptions to the job: mirror its responsibilities and terminology."
                    .to_string(),
            );
        }

        if components.keywords < KEYWORDS_THRESHOLD && !missing_keywords.is_empty() {
            suggestions.push(format!(
                "Include these job keywords in your resume: {}",
                top_items(missing_keywords)
            ));
        }

        suggestions.extend(formatting_issues.iter().cloned());

        if components.skills > STRONG_MATCH_THRESHOLD && components.keywords > STRONG_MATCH_THRESHOLD {
            suggestions.push("Great match! Your skills and keywords align well with this job.".to_string());
        }

        dedupe_and_cap(suggestions, MAX_SUGGESTIONS)
    }
}

/// Keep the first occurrence of each suggestion, at most `cap` of them.
pub fn dedupe_and_cap(suggestions: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .take(cap)
        .collect()
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn top_items(items: &[String]) -> String {
    items.iter().take(TOP_MISSING).cloned().collect::<Vec<_>>().join(", ")
}

fn to_display_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_resume() -> ParsedResume {
        ParsedResume {
            content: "Senior engineer. Developed React front ends and Node.js services. \
                      Led the migration to Kubernetes."
                .to_string(),
            skills: strings(&["React", "Node.js"]),
            experience: strings(&["Engineer, Acme 2019 - 2023. Developed React front ends and Node.js services."]),
            education: strings(&["BSc Computer Science, 2015"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((ScoringWeights::DEFAULT.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoringWeights {
            skills: 0.5,
            ..ScoringWeights::DEFAULT
        };
        assert!(matches!(
            AnalysisEngine::new(weights),
            Err(ResumeScorerError::Configuration(_))
        ));

        let negative = ScoringWeights {
            skills: 0.6,
            formatting: -0.1,
            ..ScoringWeights::DEFAULT
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_skills_scenario() {
        let job = JobDescriptionInput::new("Frontend role")
            .with_required_skills(["React", "AWS"])
            .with_preferred_skills(["Docker"]);
        let engine = AnalysisEngine::default();
        let result = engine.calculate(&sample_resume(), &job);

        assert_eq!(result.matched_skills, vec!["React"]);
        assert_eq!(result.missing_skills, vec!["AWS"]);
        assert!(result.matched_preferred_skills.is_empty());
        assert!((result.component_scores.skills - 40.0).abs() < 1e-9);
        assert_eq!(result.skills_score, 40);
    }

    #[test]
    fn test_preferred_bonus_is_capped() {
        let job = JobDescriptionInput::new("role")
            .with_required_skills(["React"])
            .with_preferred_skills(["Node"]);
        let score = AnalysisEngine::default().score_skills(&sample_resume(), &job);
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn test_empty_required_skills_score_zero() {
        let job = JobDescriptionInput::new("role");
        let score = AnalysisEngine::default().score_skills(&sample_resume(), &job);
        assert_eq!(score.score, 0.0);
        assert!(score.matched.is_empty() && score.missing.is_empty());
    }

    #[test]
    fn test_overall_rounds_after_combining() {
        // Rounding each component first would give round(4*0.9) = 4
        let engine = AnalysisEngine::default();
        let components = ComponentScores {
            skills: 3.5,
            experience: 3.5,
            keywords: 3.5,
            formatting: 0.0,
        };
        assert_eq!(engine.overall_score(&components), 3);
    }

    #[test]
    fn test_overall_matches_weighted_components() {
        let job = JobDescriptionInput::new("React engineer building Node.js services on Kubernetes")
            .with_required_skills(["React", "Kubernetes", "Go"])
            .with_keywords(["react", "kubernetes", "graphql"]);
        let result = AnalysisEngine::default().calculate(&sample_resume(), &job);
        let c = result.component_scores;
        let expected = (c.skills * 0.4 + c.experience * 0.3 + c.keywords * 0.2 + c.formatting * 0.1).round() as u8;

        assert_eq!(result.overall_score, expected);
    }

    #[test]
    fn test_scores_bounded_for_degenerate_inputs() {
        let engine = AnalysisEngine::default();
        let cases = [
            (ParsedResume::default(), JobDescriptionInput::default()),
            (sample_resume(), JobDescriptionInput::default()),
            (ParsedResume::default(), JobDescriptionInput::new("x").with_keywords(["rust"])),
        ];

        for (resume, job) in cases.iter() {
            let result = engine.calculate(resume, job);
            for score in [
                result.overall_score,
                result.skills_score,
                result.experience_score,
                result.keywords_score,
                result.formatting_score,
            ] {
                assert!(score <= 100);
            }
        }
    }

    #[test]
    fn test_empty_keywords_component_is_zero() {
        let job = JobDescriptionInput::new("React role").with_required_skills(["React"]);
        let result = AnalysisEngine::default().calculate(&sample_resume(), &job);
        assert_eq!(result.keywords_score, 0);
        assert!(!result.component_scores.keywords.is_nan());
    }

    #[test]
    fn test_partition_preserves_required_order() {
        let required = ["AWS", "React", "Terraform", "Node"];
        let job = JobDescriptionInput::new("role").with_required_skills(required);
        let result = AnalysisEngine::default().calculate(&sample_resume(), &job);

        let mut union: Vec<&String> = result.matched_skills.iter().chain(&result.missing_skills).collect();
        union.sort();
        let mut expected: Vec<String> = strings(&required);
        expected.sort();
        assert_eq!(union, expected.iter().collect::<Vec<_>>());
        assert_eq!(result.matched_skills, vec!["React", "Node"]);
        assert_eq!(result.missing_skills, vec!["AWS", "Terraform"]);
    }

    #[test]
    fn test_suggestion_order() {
        let job = JobDescriptionInput::new("Kubernetes platform role with Terraform and Prometheus")
            .with_required_skills(["AWS"])
            .with_keywords(["terraform"]);
        let result = AnalysisEngine::default().calculate(&sample_resume(), &job);

        assert!(result.suggestions[0].contains("AWS"));
        assert!(result.suggestions[1].contains("Tailor your experience"));
        assert!(result.suggestions[2].contains("terraform"));
        assert!(result.suggestions.iter().any(|s| s.contains("too short")));
        assert!(result.suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_congratulates_strong_match() {
        let job = JobDescriptionInput::new("React and Node.js")
            .with_required_skills(["React"])
            .with_preferred_skills(["Node.js"])
            .with_keywords(["react"]);
        let mut resume = sample_resume();
        resume.content = format!("{} React React React", resume.content);
        let result = AnalysisEngine::default().calculate(&resume, &job);

        assert!(result.suggestions.last().is_some_and(|s| s.starts_with("Great match")));
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let job = JobDescriptionInput::new("React engineer with AWS")
            .with_required_skills(["React", "AWS"])
            .with_keywords(["react", "aws"]);
        let engine = AnalysisEngine::default();
        let first = serde_json::to_string(&engine.calculate(&sample_resume(), &job)).unwrap();
        let second = serde_json::to_string(&engine.calculate(&sample_resume(), &job)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dedupe_and_cap() {
        let input = strings(&["a", "b", "a", "c", "b", "d"]);
        assert_eq!(dedupe_and_cap(input.clone(), 10), strings(&["a", "b", "c", "d"]));
        assert_eq!(dedupe_and_cap(input, 2), strings(&["a", "b"]));
    }
}
