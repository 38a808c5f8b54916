//! Static word lists used by the quality checks

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Overused resume phrases
pub const CLICHES: &[&str] = &[
    "team player",
    "hard worker",
    "hard-working",
    "hardworking",
    "detail-oriented",
    "detail oriented",
    "results-driven",
    "results driven",
    "go-getter",
    "self-starter",
    "self starter",
    "think outside the box",
    "out of the box",
    "proven track record",
    "track record",
    "dynamic",
    "synergy",
    "motivated",
    "passionate",
    "best of breed",
    "go-to person",
    "strategic thinker",
    "excellent communication skills",
    "works well under pressure",
    "fast learner",
    "quick learner",
    "people person",
    "value add",
    "thought leader",
    "wears many hats",
];

/// AFINN-style word valences, -5..=5
const SENTIMENT_SCORES: &[(&str, i32)] = &[
    ("abandon", -2), ("abandoned", -2), ("bad", -3), ("blame", -2), ("boring", -3),
    ("broken", -1), ("conflict", -2), ("complain", -2), ("difficult", -1), ("disappointed", -2),
    ("fail", -2), ("failed", -2), ("failure", -2), ("fired", -2), ("frustrated", -2),
    ("hate", -3), ("horrible", -3), ("lack", -2), ("lacking", -2), ("lost", -3),
    ("mistake", -2), ("negative", -2), ("poor", -2), ("problem", -2), ("problems", -2),
    ("quit", -1), ("struggle", -2), ("struggled", -2), ("terrible", -3), ("unable", -2),
    ("unfortunately", -2), ("weak", -2), ("worst", -3), ("wrong", -2), ("toxic", -3),
    ("accomplished", 2), ("achieve", 2), ("achieved", 2), ("award", 3), ("awarded", 3),
    ("best", 3), ("creative", 2), ("effective", 2), ("efficient", 2), ("excellent", 3),
    ("exceptional", 3), ("gain", 2), ("great", 3), ("growth", 2), ("improve", 2),
    ("improved", 2), ("innovative", 2), ("outstanding", 5), ("praised", 3), ("proud", 2),
    ("recognized", 2), ("resolved", 2), ("skilled", 2), ("strong", 2), ("success", 2),
    ("successful", 3), ("successfully", 3), ("support", 2), ("win", 4), ("won", 3),
];

/// Words that place a bullet in its situation or scope
pub const CONTEXT_CUES: &[&str] = &[
    "across", "within", "using", "while", "during", "for a", "for the", "in a", "in order to",
    "as part of", "responsible for", "tasked with", "serving", "throughout", "spanning",
];

/// Words that state an outcome
pub const RESULT_CUES: &[&str] = &[
    "resulting in", "resulted in", "leading to", "which led to", "improved", "improving",
    "increased", "increasing", "reduced", "reducing", "saved", "saving", "achieved", "grew",
    "boosted", "cut", "generated", "accelerated", "eliminated", "doubled", "tripled",
];

pub const FIRST_PERSON: &[&str] = &["i", "me", "my", "mine", "myself", "i'm", "i've", "i'd", "i'll"];

pub static SENTIMENT: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| SENTIMENT_SCORES.iter().copied().collect());

pub static CONTEXT_REGEX: Lazy<Regex> = Lazy::new(|| word_alternation(CONTEXT_CUES));

/// Outcome words, or any percentage
pub static RESULT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)(?:\b(?:{})\b|\d+(?:\.\d+)?\s?%)", escaped(RESULT_CUES)))
        .expect("Result cue pattern is valid")
});

/// Case-insensitive whole-word match of any entry in `words`.
pub fn word_alternation(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", escaped(words))).expect("Cue word pattern is valid")
}

fn escaped(words: &[&str]) -> String {
    words.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_lookup() {
        assert_eq!(SENTIMENT.get("outstanding"), Some(&5));
        assert_eq!(SENTIMENT.get("failed"), Some(&-2));
        assert!(SENTIMENT.get("kubernetes").is_none());
    }

    #[test]
    fn test_cue_regexes() {
        assert!(CONTEXT_REGEX.is_match("Migrated billing across three regions"));
        assert!(RESULT_REGEX.is_match("Tuned queries, resulting in faster pages"));
        assert!(RESULT_REGEX.is_match("Latency down 40%"));
        assert!(!RESULT_REGEX.is_match("Wrote documentation"));
    }
}
