//! Segmentation, skill matching and the ATS component scorers

pub mod document;
pub mod text_processor;
pub mod segmenter;
pub mod ats_matcher;
pub mod relevance;
pub mod keyword_density;
pub mod structure;
pub mod analyzer;
