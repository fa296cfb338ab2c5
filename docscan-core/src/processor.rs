//! Per-file processing: extract, clean, classify, stat

use crate::classify::{Classifier, LanguageDetector};
use crate::cleaner::{summarize, DEFAULT_SUMMARY_LEN};
use crate::extract::{file_extension, Backends, Extractor};
use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// One entry of the scan report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub filename: String,
    pub tag: String,
    /// Cleaned text, at most `DEFAULT_SUMMARY_LEN` characters
    pub summary: String,
    /// Lower-cased, without the dot
    pub extension: String,
    pub size_kb: f64,
    /// ISO-8601; falls back to `modified` where birth time is unavailable
    pub created: Option<String>,
    pub modified: Option<String>,
    pub language: String,
    pub page_count: u32,
    /// Words in `summary`
    pub word_count: usize,
    pub content_type: String,
    pub domain: String,
    pub modules_mentioned: Vec<String>,
    pub process_step: String,
    pub version: String,
    pub contains_images: bool,
    pub tables_count: u32,
    /// 1-5
    pub complexity: u8,
    pub is_confidential: bool,
}

/// Filesystem facts about a file
#[derive(Debug, Clone, Default, PartialEq)]
struct FileStat {
    size_kb: f64,
    created: Option<String>,
    modified: Option<String>,
}

/// Extraction, cleaning and classification for a single file
#[derive(Debug, Clone)]
pub struct FileProcessor {
    extractor: Extractor,
    classifier: Classifier,
    summary_len: usize,
}

impl FileProcessor {
    /// Build a processor over the given capabilities
    pub fn new(backends: Backends) -> Self {
        Self {
            extractor: Extractor::new(backends),
            classifier: Classifier::new(LanguageDetector::new(backends.lang_detect())),
            summary_len: DEFAULT_SUMMARY_LEN,
        }
    }

    /// Override the summary length
    pub fn with_summary_len(mut self, summary_len: usize) -> Self {
        self.summary_len = summary_len;
        self
    }

    pub fn backends(&self) -> Backends {
        self.extractor.backends()
    }

    /// Build the record for `path`. Failures end up in field values, never in a panic or error.
    pub fn process(&self, path: &Path, tag: &str, domain: &str) -> FileRecord {
        tracing::debug!("Processing {}", path.display());

        let extraction = self.extractor.extract(path);
        let summary = summarize(&extraction.text, self.summary_len);
        let classification = self.classifier.classify(&extraction.text, &summary);
        let stat = stat_file(path);

        FileRecord {
            path: path.to_string_lossy().into_owned(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            tag: tag.to_string(),
            summary,
            extension: file_extension(path),
            size_kb: stat.size_kb,
            created: stat.created,
            modified: stat.modified,
            language: classification.language,
            page_count: extraction.page_count,
            word_count: classification.word_count,
            content_type: classification.content_type,
            domain: domain.to_string(),
            modules_mentioned: classification.modules_mentioned,
            process_step: classification.process_step,
            version: classification.version,
            contains_images: extraction.contains_images,
            tables_count: extraction.tables_count,
            complexity: classification.complexity,
            is_confidential: classification.is_confidential,
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(Backends::detect())
    }
}

fn stat_file(path: &Path) -> FileStat {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("Cannot stat {}: {}", path.display(), e);
            return FileStat::default();
        }
    };

    let modified = metadata.modified().ok();
    let created = metadata.created().ok().or(modified);

    FileStat {
        size_kb: size_in_kb(metadata.len()),
        created: created.map(iso_timestamp),
        modified: modified.map(iso_timestamp),
    }
}

/// Kilobytes rounded to two decimals
pub fn size_in_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

fn iso_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339_opts(SecondsFormat::Secs, false)
}
