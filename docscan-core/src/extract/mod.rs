//! Format extraction
//!
//! Dispatches on the lower-cased file extension to one of the extraction
//! strategies. Every strategy degrades to a textual placeholder instead of
//! returning an error, so classification always has a string to work on.
//!
//! ## Supported Formats
//! - Text: `.txt`, `.md`, `.log` (direct read)
//! - Word: `.docx` via docx-rs (feature `docx`)
//! - PDF: `.pdf` via lopdf (feature `pdf`), falling back to pdf-extract
//!   (feature `pdf-text`)

mod docx;
mod pdf;
mod text;

pub use pdf::{count_ruled_tables, PdfStrategy};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Character budget for plain text reads
pub const MAX_TEXT_CHARS: usize = 20_000;

/// Returned when no DOCX backend is compiled in
pub const DOCX_UNAVAILABLE: &str = "DOCX extraction unavailable: no DOCX backend installed.";

/// Returned when no PDF backend is compiled in
pub const PDF_UNAVAILABLE: &str = "PDF extraction unavailable: no PDF backend installed.";

/// Returned for extensions without an extraction strategy
pub const UNSUPPORTED_EXTENSION: &str = "Unsupported file extension.";

/// Uniform output of every extraction strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text, or a human-readable explanation when extraction failed
    pub text: String,
    /// Number of pages; 0 means extraction failed or the type is unsupported
    pub page_count: u32,
    /// Whether embedded images were found
    pub contains_images: bool,
    /// Number of tables found
    pub tables_count: u32,
}

impl ExtractionResult {
    /// A failed extraction carrying an explanatory message
    pub fn placeholder<S: Into<String>>(message: S) -> Self {
        Self {
            text: message.into(),
            page_count: 0,
            contains_images: false,
            tables_count: 0,
        }
    }

    /// True when `page_count` signals failure or an unsupported type
    pub fn is_placeholder(&self) -> bool {
        self.page_count == 0
    }
}

/// Optional extraction capabilities, resolved once at startup.
///
/// A capability can only be switched on when its backend is compiled in;
/// the `without_*` methods let callers (and tests) simulate a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backends {
    docx: bool,
    pdf_introspect: bool,
    pdf_text: bool,
    lang_detect: bool,
}

impl Backends {
    /// Capabilities available in this build
    pub fn detect() -> Self {
        Self {
            docx: cfg!(feature = "docx"),
            pdf_introspect: cfg!(feature = "pdf"),
            pdf_text: cfg!(feature = "pdf-text"),
            lang_detect: cfg!(feature = "lang-detect"),
        }
    }

    /// No optional capability at all
    pub fn none() -> Self {
        Self {
            docx: false,
            pdf_introspect: false,
            pdf_text: false,
            lang_detect: false,
        }
    }

    pub fn without_docx(mut self) -> Self {
        self.docx = false;
        self
    }

    pub fn without_pdf(mut self) -> Self {
        self.pdf_introspect = false;
        self.pdf_text = false;
        self
    }

    pub fn without_pdf_introspect(mut self) -> Self {
        self.pdf_introspect = false;
        self
    }

    pub fn without_lang_detect(mut self) -> Self {
        self.lang_detect = false;
        self
    }

    pub fn docx(&self) -> bool {
        self.docx
    }

    pub fn pdf_introspect(&self) -> bool {
        self.pdf_introspect
    }

    pub fn pdf_text(&self) -> bool {
        self.pdf_text
    }

    pub fn lang_detect(&self) -> bool {
        self.lang_detect
    }

    /// Short human-readable listing for diagnostics
    pub fn describe(&self) -> String {
        let names: Vec<&str> = [
            (self.docx, "docx"),
            (self.pdf_introspect, "pdf"),
            (self.pdf_text, "pdf-text"),
            (self.lang_detect, "lang-detect"),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, name)| *name)
        .collect();

        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::detect()
    }
}

/// Extension-based dispatcher over the available backends
#[derive(Debug, Clone)]
pub struct Extractor {
    backends: Backends,
}

impl Extractor {
    pub fn new(backends: Backends) -> Self {
        Self { backends }
    }

    pub fn backends(&self) -> Backends {
        self.backends
    }

    /// Extract text and layout hints from `path`. Never fails.
    pub fn extract(&self, path: &Path) -> ExtractionResult {
        let ext = file_extension(path);
        match ext.as_str() {
            "txt" | "md" | "log" => text::extract_plain_text(path, MAX_TEXT_CHARS),
            "docx" => self.extract_docx(path),
            "pdf" => self.extract_pdf(path),
            _ => ExtractionResult::placeholder(UNSUPPORTED_EXTENSION),
        }
    }

    fn extract_docx(&self, path: &Path) -> ExtractionResult {
        if !self.backends.docx {
            return ExtractionResult::placeholder(DOCX_UNAVAILABLE);
        }

        match docx::extract_docx(path) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("DOCX extraction failed for {}: {}", path.display(), e);
                ExtractionResult::placeholder(format!("Error reading DOCX: {}", e))
            }
        }
    }

    /// PDF strategies in preference order, restricted to available backends
    pub fn pdf_chain(&self) -> Vec<PdfStrategy> {
        PdfStrategy::all()
            .into_iter()
            .filter(|strategy| match strategy {
                PdfStrategy::Introspect => self.backends.pdf_introspect,
                PdfStrategy::TextOnly => self.backends.pdf_text,
            })
            .collect()
    }

    fn extract_pdf(&self, path: &Path) -> ExtractionResult {
        let chain = self.pdf_chain();
        if chain.is_empty() {
            return ExtractionResult::placeholder(PDF_UNAVAILABLE);
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return ExtractionResult::placeholder(format!("Error reading PDF: {}", e)),
        };

        run_pdf_chain(path, &chain, |strategy| strategy.extract(&bytes))
    }
}

/// Try `chain` in order. The first success wins; when every strategy fails
/// the last error is reported with `page_count = 0`.
fn run_pdf_chain<F>(path: &Path, chain: &[PdfStrategy], mut attempt: F) -> ExtractionResult
where
    F: FnMut(PdfStrategy) -> Result<ExtractionResult>,
{
    let mut last_error = None;
    for strategy in chain {
        match attempt(*strategy) {
            Ok(result) => {
                tracing::debug!(
                    "PDF {} extracted with {} backend ({} pages)",
                    path.display(),
                    strategy.name(),
                    result.page_count
                );
                return result;
            }
            Err(e) => {
                tracing::warn!(
                    "PDF {} backend failed for {}: {}",
                    strategy.name(),
                    path.display(),
                    e
                );
                last_error = Some(e);
            }
        }
    }

    let reason = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no backend succeeded".to_string());
    ExtractionResult::placeholder(format!("Error reading PDF: {}", reason))
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Backends::detect())
    }
}

/// Lower-cased extension without the leading dot; empty when there is none
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
