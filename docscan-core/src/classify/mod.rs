//! Heuristic classifiers
//!
//! Pure functions over extracted text. Nothing here can fail: every
//! classifier returns a neutral value (`""`, `"unknown"`, `false`, `1`) when
//! it finds no signal.

mod language;
mod registry;

pub use language::{detect_by_stop_words, LanguageDetector, LANGUAGE_SAMPLE_CHARS, UNKNOWN_LANGUAGE};
pub use registry::{all_matches, first_match, Registry, CONTENT_TYPES, MODULES, PROCESS_STEPS};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:R\d{2}|V\d+(?:\.\d+)?|Draft)\b").expect("valid regex"));

static CONFIDENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:confidential|riservato|internal)\b").expect("valid regex"));

/// Upper bounds (exclusive) of word counts for complexity 1 to 4
const COMPLEXITY_THRESHOLDS: [usize; 4] = [200, 800, 1500, 3000];

/// Module codes mentioned anywhere in `text`, in registry order
pub fn modules_mentioned(text: &str) -> Vec<String> {
    all_matches(MODULES, &text.to_lowercase())
}

/// First matching process step, or an empty string
pub fn process_step(text: &str) -> String {
    first_match(PROCESS_STEPS, &text.to_lowercase())
}

/// First matching content type, or an empty string
pub fn content_type(text: &str) -> String {
    first_match(CONTENT_TYPES, &text.to_lowercase())
}

/// First version token (`R21`, `v2`, `V1.3`, `Draft`) in document order
pub fn version(text: &str) -> String {
    VERSION
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Whole-word `confidential`, `riservato` or `internal`, any case
pub fn is_confidential(text: &str) -> bool {
    CONFIDENTIAL.is_match(text)
}

/// 1-5 bucket of a word count
pub fn complexity(word_count: usize) -> u8 {
    COMPLEXITY_THRESHOLDS
        .iter()
        .position(|&limit| word_count < limit)
        .map(|bucket| bucket as u8 + 1)
        .unwrap_or(5)
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// All classifier outputs for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub language: String,
    pub modules_mentioned: Vec<String>,
    pub process_step: String,
    pub content_type: String,
    pub version: String,
    pub is_confidential: bool,
    pub word_count: usize,
    pub complexity: u8,
}

/// Runs every classifier with a fixed language detection strategy
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    detector: LanguageDetector,
}

impl Classifier {
    pub fn new(detector: LanguageDetector) -> Self {
        Self { detector }
    }

    /// Classify raw extracted text; word count and complexity use the summary
    pub fn classify(&self, raw_text: &str, summary: &str) -> Classification {
        let words = word_count(summary);
        Classification {
            language: self.detector.detect(raw_text),
            modules_mentioned: modules_mentioned(raw_text),
            process_step: process_step(raw_text),
            content_type: content_type(raw_text),
            version: version(raw_text),
            is_confidential: is_confidential(raw_text),
            word_count: words,
            complexity: complexity(words),
        }
    }
}
