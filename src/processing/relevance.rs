//! TF-IDF relevance between resume experience and a job description

use crate::processing::document::ParsedResume;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terms of this many characters or fewer are ignored
const MAX_SHORT_TERM_CHARS: usize = 3;
/// Job-description terms that are checked against the resume
const TOP_TERMS: usize = 20;
/// Terms exposed for transparency
const RELEVANT_TERMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceScore {
    /// 0..=100
    pub score: f64,
    /// Top job terms found in the resume
    pub matched: Vec<String>,
    /// Top job terms not found in the resume
    pub missing: Vec<String>,
    /// Highest-weighted job terms, found or not
    pub relevant_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

/// Term-frequency model over a small document corpus.
///
/// `tfidf(t, d) = count(t, d) * (1 + ln(N / (1 + df(t))))`, the smoothed form
/// that keeps terms shared by every document slightly positive or negative
/// instead of zeroing them out.
pub struct TfIdf {
    documents: Vec<HashMap<String, usize>>,
}

impl TfIdf {
    pub fn new(texts: &[&str], processor: &TextProcessor) -> Self {
        let documents = texts
            .iter()
            .map(|text| {
                let mut counts: HashMap<String, usize> = HashMap::new();
                for word in processor.words(text) {
                    if word.chars().count() > MAX_SHORT_TERM_CHARS && word.chars().any(char::is_alphabetic) {
                        *counts.entry(word).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        Self { documents }
    }

    pub fn idf(&self, term: &str) -> f64 {
        let df = self.documents.iter().filter(|doc| doc.contains_key(term)).count();
        1.0 + (self.documents.len() as f64 / (1.0 + df as f64)).ln()
    }

    /// Terms of one document by descending weight, ties broken alphabetically.
    pub fn top_terms(&self, document: usize, limit: usize) -> Vec<WeightedTerm> {
        let Some(counts) = self.documents.get(document) else {
            return Vec::new();
        };

        let mut terms: Vec<WeightedTerm> = counts
            .iter()
            .map(|(term, count)| WeightedTerm {
                term: term.clone(),
                weight: *count as f64 * self.idf(term),
            })
            .filter(|t| t.weight > 0.0)
            .collect();

        terms.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.term.cmp(&b.term))
        });
        terms.truncate(limit);
        terms
    }
}

pub struct RelevanceScorer {
    text_processor: TextProcessor,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
        }
    }

    pub fn score(&self, resume: &ParsedResume, job_description: &str) -> RelevanceScore {
        self.score_text(&resume.experience_text(), &resume.content, job_description)
    }

    /// Weight job terms by TF-IDF over {experience, job description} and
    /// measure how much of that weight appears anywhere in the resume.
    pub fn score_text(&self, experience_text: &str, resume_content: &str, job_description: &str) -> RelevanceScore {
        let model = TfIdf::new(&[experience_text, job_description], &self.text_processor);
        let top_terms = model.top_terms(1, TOP_TERMS);
        let content_lower = resume_content.to_lowercase();

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut matched_weight = 0.0;
        let mut total_weight = 0.0;

        for term in &top_terms {
            total_weight += term.weight;
            if content_lower.contains(&term.term) {
                matched_weight += term.weight;
                matched.push(term.term.clone());
            } else {
                missing.push(term.term.clone());
            }
        }

        let score = if total_weight > 0.0 {
            (100.0 * matched_weight / total_weight).clamp(0.0, 100.0)
        } else {
            0.0
        };

        debug!(
            "Relevance: {:.1} ({} of {} top terms matched)",
            score,
            matched.len(),
            top_terms.len()
        );

        RelevanceScore {
            score,
            matched,
            missing,
            relevant_terms: top_terms
                .iter()
                .take(RELEVANT_TERMS)
                .map(|t| t.term.clone())
                .collect(),
        }
    }
}
