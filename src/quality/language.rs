//! Language quality: passive voice, pronouns, word length, clichés and tone

use crate::processing::text_processor::{contains_term, TextProcessor};
use crate::quality::lexicon::{CLICHES, FIRST_PERSON, SENTIMENT};
use crate::quality::QualityScore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_PASSIVE: usize = 5;
const MAX_FIRST_PERSON: usize = 3;
const MAX_CLICHES: usize = 2;
const LONG_WORD_LETTERS: usize = 13;
const MAX_LONG_WORD_RATIO: f64 = 0.3;
const MIN_SENTIMENT: f64 = -0.5;

const PASSIVE_PENALTY: f64 = 15.0;
const FIRST_PERSON_PENALTY: f64 = 10.0;
const LONG_WORDS_PENALTY: f64 = 10.0;
const CLICHE_PENALTY: f64 = 15.0;
const SENTIMENT_PENALTY: f64 = 10.0;

static PASSIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:was|were|been|being)\s+(?:\w+ly\s+)?\w+ed\b").expect("Passive voice pattern is valid")
});

/// Raw counts behind the language score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub passive_constructions: usize,
    pub first_person_pronouns: usize,
    pub long_words: usize,
    pub sentences: usize,
    pub cliches: Vec<String>,
    /// Lexicon score per word token
    pub sentiment: f64,
}

pub struct LanguageAnalyzer {
    text_processor: TextProcessor,
}

impl Default for LanguageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
        }
    }

    pub fn stats(&self, text: &str) -> LanguageStats {
        let words = self.text_processor.words(text);
        let long_words = words
            .iter()
            .filter(|w| w.chars().filter(|c| c.is_alphabetic()).count() >= LONG_WORD_LETTERS)
            .count();
        let first_person_pronouns = words.iter().filter(|w| FIRST_PERSON.contains(&w.as_str())).count();

        let sentiment = if words.is_empty() {
            0.0
        } else {
            let total: i32 = words.iter().filter_map(|w| SENTIMENT.get(w.as_str())).sum();
            total as f64 / words.len() as f64
        };

        LanguageStats {
            passive_constructions: PASSIVE_REGEX.find_iter(text).count(),
            first_person_pronouns,
            long_words,
            sentences: self.text_processor.split_sentences(text).len(),
            cliches: CLICHES
                .iter()
                .filter(|c| contains_term(text, c))
                .map(|c| c.to_string())
                .collect(),
            sentiment,
        }
    }

    pub fn analyze(&self, text: &str) -> (QualityScore, LanguageStats) {
        let stats = self.stats(text);
        let mut score: f64 = 100.0;
        let mut feedback = Vec::new();

        if stats.passive_constructions > MAX_PASSIVE {
            score -= PASSIVE_PENALTY;
            feedback.push(format!(
                "Reduce passive voice ({} instances); say what you did directly.",
                stats.passive_constructions
            ));
        }

        if stats.first_person_pronouns > MAX_FIRST_PERSON {
            score -= FIRST_PERSON_PENALTY;
            feedback.push(format!(
                "Drop first-person pronouns ({} found); resumes read better without \"I\" and \"my\".",
                stats.first_person_pronouns
            ));
        }

        if stats.sentences > 0 && stats.long_words as f64 > stats.sentences as f64 * MAX_LONG_WORD_RATIO {
            score -= LONG_WORDS_PENALTY;
            feedback.push("Prefer shorter, plainer words where a long one adds nothing.".to_string());
        }

        if stats.cliches.len() > MAX_CLICHES {
            score -= CLICHE_PENALTY;
            feedback.push(format!(
                "Replace clichés ({}) with concrete evidence.",
                stats.cliches.join(", ")
            ));
        }

        if stats.sentiment < MIN_SENTIMENT {
            score -= SENTIMENT_PENALTY;
            feedback.push("The tone reads negative; frame past roles by what you accomplished.".to_string());
        }

        (
            QualityScore {
                score: score.max(0.0),
                feedback,
            },
            stats,
        )
    }
}
