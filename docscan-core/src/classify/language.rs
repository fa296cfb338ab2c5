use once_cell::sync::Lazy;
use regex::Regex;

/// Characters of text considered for language detection
pub const LANGUAGE_SAMPLE_CHARS: usize = 2000;

/// Returned when no language can be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

const ITALIAN_STOP_WORDS: &[&str] = &[
    "il", "lo", "la", "gli", "le", "di", "che", "per", "con", "non", "una", "del", "della",
    "sono", "questo", "anche",
];

const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "and", "of", "to", "is", "that", "for", "with", "are", "this", "from", "be",
];

static ITALIAN: Lazy<Regex> = Lazy::new(|| stop_word_regex(ITALIAN_STOP_WORDS));
static ENGLISH: Lazy<Regex> = Lazy::new(|| stop_word_regex(ENGLISH_STOP_WORDS));

fn stop_word_regex(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).expect("valid regex")
}

/// Language detection strategy, chosen once from the available backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageDetector {
    /// Probabilistic detection (whatlang)
    Statistical,
    /// Italian vs English stop-word vote
    StopWords,
}

impl LanguageDetector {
    pub fn new(statistical_available: bool) -> Self {
        if statistical_available {
            LanguageDetector::Statistical
        } else {
            LanguageDetector::StopWords
        }
    }

    /// Language code of the first `LANGUAGE_SAMPLE_CHARS` characters, or `"unknown"`
    pub fn detect(&self, text: &str) -> String {
        let sample = sample(text);
        match self {
            LanguageDetector::Statistical => detect_statistical(sample),
            LanguageDetector::StopWords => detect_by_stop_words(sample),
        }
    }
}

fn sample(text: &str) -> &str {
    match text.char_indices().nth(LANGUAGE_SAMPLE_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// `"it"` or `"en"` by whole-word stop-word count; ties are `"unknown"`
pub fn detect_by_stop_words(text: &str) -> String {
    let italian = ITALIAN.find_iter(text).count();
    let english = ENGLISH.find_iter(text).count();

    if italian > english {
        "it".to_string()
    } else if english > italian {
        "en".to_string()
    } else {
        UNKNOWN_LANGUAGE.to_string()
    }
}

#[cfg(feature = "lang-detect")]
fn detect_statistical(text: &str) -> String {
    match whatlang::detect(text) {
        Some(info) if info.is_reliable() => iso_639_1(info.lang().code()).to_string(),
        _ => UNKNOWN_LANGUAGE.to_string(),
    }
}

#[cfg(not(feature = "lang-detect"))]
fn detect_statistical(text: &str) -> String {
    detect_by_stop_words(text)
}

/// Two-letter code for common ISO 639-3 codes; other codes pass through
#[cfg_attr(not(feature = "lang-detect"), allow(dead_code))]
fn iso_639_1(code: &str) -> &str {
    match code {
        "ita" => "it",
        "eng" => "en",
        "fra" => "fr",
        "deu" => "de",
        "spa" => "es",
        "por" => "pt",
        "nld" => "nl",
        "ron" => "ro",
        "pol" => "pl",
        "rus" => "ru",
        "cmn" => "zh",
        "jpn" => "ja",
        other => other,
    }
}
