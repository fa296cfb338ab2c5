//! Docscan - document inventory for shared drives
//!
//! Walks a configured folder tree, extracts text from Word, PDF and plain
//! text files, classifies each document with lightweight heuristics and
//! emits a single JSON report.

pub mod classify;
pub mod cleaner;
pub mod error;
pub mod extract;
pub mod processor;
pub mod report;
pub mod scanner;

pub use classify::{Classification, Classifier, LanguageDetector};
pub use cleaner::{clean, summarize};
pub use error::{Result, ScanError};
pub use extract::{Backends, ExtractionResult, Extractor};
pub use processor::{FileProcessor, FileRecord};
pub use report::{ScanDriver, ScanReport};
pub use scanner::{FileCandidate, PathFilter, ScanConfig};

/// Docscan version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file read when none is given
pub const DEFAULT_CONFIG_FILE: &str = "docs_config.json";

/// Report file written when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "output.json";

/// Load `config_path`, scan, and return the report
pub fn scan_with_config(config_path: &std::path::Path) -> Result<ScanReport> {
    let config = ScanConfig::load(config_path)?;
    ScanDriver::default().scan(&config)
}
