//! Structure and formatting checks

use crate::processing::document::ParsedResume;
use crate::processing::text_processor::contains_term;
use log::debug;
use serde::{Deserialize, Serialize};

pub const MIN_CONTENT_CHARS: usize = 500;

const SHORT_CONTENT_PENALTY: f64 = 20.0;
const NO_SKILLS_PENALTY: f64 = 30.0;
const NO_EXPERIENCE_PENALTY: f64 = 30.0;
const NO_EDUCATION_PENALTY: f64 = 20.0;
const NO_ACTION_VERBS_PENALTY: f64 = 10.0;

pub const ACTION_VERBS: &[&str] = &[
    "achieved", "managed", "led", "developed", "created", "implemented", "designed",
    "improved", "increased", "reduced", "launched", "built", "delivered", "established",
    "optimized", "streamlined", "coordinated", "spearheaded", "drove", "architected",
    "automated", "mentored", "negotiated", "resolved", "transformed",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingScore {
    pub score: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Default)]
pub struct StructureScorer;

impl StructureScorer {
    pub fn new() -> Self {
        Self
    }

    /// Start at 100 and subtract a fixed penalty per failed check.
    pub fn score(&self, resume: &ParsedResume) -> FormattingScore {
        let mut score: f64 = 100.0;
        let mut issues = Vec::new();

        if resume.content.chars().count() < MIN_CONTENT_CHARS {
            score -= SHORT_CONTENT_PENALTY;
            issues.push("Resume is too short. Aim for at least 500 characters of content.".to_string());
        }

        if resume.skills.is_empty() {
            score -= NO_SKILLS_PENALTY;
            issues.push("No skills section detected. Add a dedicated Skills section.".to_string());
        }

        if resume.experience.is_empty() {
            score -= NO_EXPERIENCE_PENALTY;
            issues.push("No work experience detected. Add an Experience section with your roles.".to_string());
        }

        if resume.education.is_empty() {
            score -= NO_EDUCATION_PENALTY;
            issues.push("No education section detected. Add your degrees or training.".to_string());
        }

        if !has_action_verbs(&resume.content) {
            score -= NO_ACTION_VERBS_PENALTY;
            issues.push(
                "Use strong action verbs (e.g. achieved, managed, led, developed) to describe your work."
                    .to_string(),
            );
        }

        let score = score.max(0.0);
        debug!("Formatting: {:.1} ({} issues)", score, issues.len());

        FormattingScore { score, issues }
    }
}

pub fn has_action_verbs(content: &str) -> bool {
    ACTION_VERBS.iter().any(|verb| contains_term(content, verb))
}
