//! Bullet-point structure checks over the experience section

use crate::processing::document::ParsedResume;
use crate::processing::structure::ACTION_VERBS;
use crate::quality::lexicon::{word_alternation, CONTEXT_REGEX, RESULT_REGEX};
use crate::quality::QualityScore;
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_BULLETS: usize = 3;
const LONG_BULLET_CHARS: usize = 150;
const SHORT_BULLET_CHARS: usize = 30;

const FEW_BULLETS_PENALTY: f64 = 30.0;
// Missing context costs less than a missing result: -25 action, -10 context, -25 result
const NO_ACTION_PENALTY: f64 = 25.0;
const NO_CONTEXT_PENALTY: f64 = 10.0;
const NO_RESULT_PENALTY: f64 = 25.0;
const LONG_BULLET_PENALTY: f64 = 10.0;
const SHORT_BULLETS_PENALTY: f64 = 10.0;

static BULLET_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[•\-*–▪◦‣●]|\d{1,2}[.)])\s+(?P<text>\S.*)$").expect("Bullet line pattern is valid")
});

static ACTION_REGEX: Lazy<Regex> = Lazy::new(|| word_alternation(ACTION_VERBS));

/// Bullet texts without their markers
pub fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| BULLET_LINE_REGEX.captures(line))
        .filter_map(|caps| caps.name("text").map(|m| m.as_str().trim().to_string()))
        .collect()
}

/// Score how well experience bullets follow an action / context / result shape.
pub fn analyze_bullets(resume: &ParsedResume) -> QualityScore {
    let experience = resume.experience_text();
    let bullets = bullet_lines(&experience);
    let mut score: f64 = 100.0;
    let mut feedback = Vec::new();

    if bullets.len() < MIN_BULLETS {
        score -= FEW_BULLETS_PENALTY;
        feedback.push(format!(
            "Use bullet points to describe your experience (found {}, aim for at least {}).",
            bullets.len(),
            MIN_BULLETS
        ));
    }

    if !ACTION_REGEX.is_match(&experience) {
        score -= NO_ACTION_PENALTY;
        feedback.push("Start bullet points with strong action verbs such as led, built or delivered.".to_string());
    }

    if !CONTEXT_REGEX.is_match(&experience) {
        score -= NO_CONTEXT_PENALTY;
        feedback.push("Give each achievement some context: the team, scope or tools involved.".to_string());
    }

    if !RESULT_REGEX.is_match(&experience) {
        score -= NO_RESULT_PENALTY;
        feedback.push("Finish bullet points with the result you achieved, ideally with a number.".to_string());
    }

    if bullets.iter().any(|b| b.chars().count() > LONG_BULLET_CHARS) {
        score -= LONG_BULLET_PENALTY;
        feedback.push(format!(
            "Keep bullet points under {} characters; split long ones.",
            LONG_BULLET_CHARS
        ));
    }

    let short = bullets.iter().filter(|b| b.chars().count() < SHORT_BULLET_CHARS).count();
    if !bullets.is_empty() && short * 2 > bullets.len() {
        score -= SHORT_BULLETS_PENALTY;
        feedback.push("Many bullet points are very short; add detail about what you did and why it mattered.".to_string());
    }

    QualityScore {
        score: score.max(0.0),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with_experience(block: &str) -> ParsedResume {
        ParsedResume {
            experience: vec![block.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_bullet_line_markers() {
        let text = "Engineer, Acme 2020\n• Built a thing\n- Led a team\n* Wrote docs\n3. Shipped v2\nplain line\n-nospace";
        assert_eq!(
            bullet_lines(text),
            vec!["Built a thing", "Led a team", "Wrote docs", "Shipped v2"]
        );
    }

    #[test]
    fn test_star_bullets_score_100() {
        let block = "Backend Engineer, Acme 2020 - 2023\n\
            • Led the migration of billing services across three regions, resulting in 40% lower latency\n\
            • Built a deployment pipeline using GitHub Actions that reduced release time by half\n\
            • Designed the caching layer for the search team, which increased throughput to 2k rps";
        let result = analyze_bullets(&resume_with_experience(block));

        assert_eq!(result.score, 100.0, "{:?}", result.feedback);
        assert!(result.feedback.is_empty());
    }

    #[test]
    fn test_no_bullets_no_cues() {
        let result = analyze_bullets(&resume_with_experience("Worked at a company for some years"));
        // -30 bullets, -25 action, -10 context, -25 result
        assert_eq!(result.score, 10.0);
        assert_eq!(result.feedback.len(), 4);
    }

    #[test]
    fn test_missing_context_costs_10() {
        let block = "Backend Engineer, Acme 2020 - 2023\n\
            • Led the billing rewrite and reduced invoice errors by 30%\n\
            • Built the deployment pipeline that cut release time in half\n\
            • Designed the caching layer and improved search throughput";
        let result = analyze_bullets(&resume_with_experience(block));

        assert_eq!(result.score, 90.0, "{:?}", result.feedback);
        assert!(result.feedback[0].contains("context"));
    }

    #[test]
    fn test_missing_result_costs_25() {
        let block = "Backend Engineer, Acme 2020 - 2023\n\
            • Led the billing rewrite across three regions and teams\n\
            • Built the deployment pipeline using GitHub Actions runners\n\
            • Designed the caching layer for the search team at scale";
        let result = analyze_bullets(&resume_with_experience(block));

        assert_eq!(result.score, 75.0, "{:?}", result.feedback);
        assert!(result.feedback[0].contains("result"));
    }

    #[test]
    fn test_short_and_long_bullets() {
        let long = format!("• Led work across teams that improved {}", "things ".repeat(30));
        let block = format!("• Led it\n• Built it\n• Fixed it\n{}", long);
        let result = analyze_bullets(&resume_with_experience(&block));

        assert!(result.feedback.iter().any(|f| f.contains("under 150")));
        assert!(result.feedback.iter().any(|f| f.contains("very short")));
        assert_eq!(result.score, 80.0);
    }

    #[test]
    fn test_empty_resume_floors() {
        let result = analyze_bullets(&ParsedResume::default());
        assert!(result.score >= 0.0);
        assert_eq!(result.score, 10.0);
    }
}
