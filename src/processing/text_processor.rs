//! Text normalization, tokenization and term counting

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

static BLANK_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
        "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
        "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "etc", "few",
        "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
        "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
        "more", "most", "must", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
        "or", "other", "our", "ours", "out", "over", "own", "same", "shall", "she", "should", "so",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these",
        "they", "this", "those", "through", "to", "too", "under", "until", "up", "us", "very",
        "was", "we", "well", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "within", "would", "you", "your", "yours", "able", "ability",
        "looking", "including", "strong", "years", "year", "work", "working", "join", "role",
    ]
    .into_iter()
    .collect()
});

pub struct TextProcessor {
    stop_words: &'static HashSet<&'static str>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            stop_words: &STOP_WORDS,
        }
    }

    /// Normalize extracted text while keeping its line structure.
    ///
    /// Line breaks carry section headers and bullets, so only horizontal
    /// noise is removed: CRLF, smart punctuation, trailing spaces and long
    /// runs of blank lines.
    pub fn normalize(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        let unified = self.normalize_unicode(&unified);

        let lines: Vec<&str> = unified.lines().map(|line| line.trim_end()).collect();
        let joined = lines.join("\n");

        BLANK_RUN_REGEX.replace_all(&joined, "\n\n").trim().to_string()
    }

    /// Lowercased word tokens with stop words and single letters removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().count() > 1 && !self.stop_words.contains(word.as_str()))
            .filter(|word| word.chars().any(|c| c.is_alphabetic()))
            .collect()
    }

    /// Every lowercased word token, stop words included.
    pub fn words(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|word| word.to_lowercase()).collect()
    }

    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Most frequent non-stop-word terms, ties broken alphabetically.
    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        let mut word_freq: HashMap<String, usize> = HashMap::new();

        for token in self.tokenize(text) {
            if token.chars().count() > 2 {
                *word_freq.entry(token).or_insert(0) += 1;
            }
        }

        let mut keywords: Vec<(String, usize)> = word_freq.into_iter().collect();
        keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        keywords
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word)
            .collect()
    }

    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{00A0}' | '\t' => ' ',
                _ => c,
            })
            .collect()
    }
}

/// Count case-insensitive, whole-word occurrences of `term` in `text`.
///
/// Boundaries are only enforced on sides where the term starts or ends with
/// an alphanumeric character, so "c++" and ".net" still count.
pub fn count_term_occurrences(text: &str, term: &str) -> usize {
    let term_lower = term.trim().to_lowercase();
    if term_lower.is_empty() {
        return 0;
    }
    let text_lower = text.to_lowercase();

    let check_start = term_lower.chars().next().is_some_and(char::is_alphanumeric);
    let check_end = term_lower.chars().last().is_some_and(char::is_alphanumeric);

    text_lower
        .match_indices(&term_lower)
        .filter(|(start, matched)| {
            let end = start + matched.len();
            let before_ok = !check_start
                || text_lower[..*start]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !c.is_alphanumeric());
            let after_ok = !check_end
                || text_lower[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric());
            before_ok && after_ok
        })
        .count()
}

pub fn contains_term(text: &str, term: &str) -> bool {
    count_term_occurrences(text, term) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_lines() {
        let processor = TextProcessor::new();
        let text = "Jane Doe  \r\n\r\n\r\n\r\nSkills\r\n\u{2022} Rust \u{2014} Go";
        let normalized = processor.normalize(text);

        assert_eq!(normalized, "Jane Doe\n\nSkills\n\u{2022} Rust - Go");
    }

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust programming language is awesome!");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(tokens.contains(&"awesome".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
    }

    #[test]
    fn test_sentence_split() {
        let processor = TextProcessor::new();
        let sentences = processor.split_sentences("Built a service. Led the team! Shipped it?");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_keyword_extraction_is_deterministic() {
        let processor = TextProcessor::new();
        let text = "Rust Rust programming language. Rust is memory safe. Programming with Rust is fun.";

        let keywords = processor.extract_keywords(text, 2);
        assert_eq!(keywords, vec!["rust".to_string(), "programming".to_string()]);
        assert_eq!(keywords, processor.extract_keywords(text, 2));
    }

    #[test]
    fn test_whole_word_counting() {
        assert_eq!(count_term_occurrences("Go, golang and GO again", "go"), 2);
        assert_eq!(count_term_occurrences("Good governance", "go"), 0);
        assert_eq!(count_term_occurrences("C++ and c++17", "c++"), 2);
        assert_eq!(count_term_occurrences("Node.js services", "node.js"), 1);
        assert_eq!(count_term_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_contains_term_is_case_insensitive() {
        assert!(contains_term("Experienced in KUBERNETES", "kubernetes"));
        assert!(!contains_term("Javascript", "java"));
    }
}
