//! PDF extraction strategies
//!
//! Two backends are tried in order:
//! 1. `Introspect` (lopdf): per-page text, image detection and a ruled-table
//!    heuristic.
//! 2. `TextOnly` (pdf-extract): text and page count only.
//!
//! Both parsers can panic on malformed fonts or xref tables, so each call is
//! wrapped in `catch_unwind`.

use super::ExtractionResult;
use crate::error::{Result, ScanError};

#[cfg(feature = "pdf")]
use lopdf::{content::Content, Dictionary, Document, Object, ObjectId};

/// Rectangles between two text objects needed to count as a table
pub const MIN_TABLE_RECTS: usize = 4;

/// Ancestor levels searched for inherited page resources
#[cfg(feature = "pdf")]
const MAX_RESOURCE_DEPTH: usize = 32;

/// A PDF extraction backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfStrategy {
    /// lopdf with page introspection
    Introspect,
    /// pdf-extract, text only
    TextOnly,
}

impl PdfStrategy {
    /// All strategies in preference order
    pub fn all() -> Vec<PdfStrategy> {
        vec![PdfStrategy::Introspect, PdfStrategy::TextOnly]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PdfStrategy::Introspect => "lopdf",
            PdfStrategy::TextOnly => "pdf-extract",
        }
    }

    pub(crate) fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult> {
        match self {
            PdfStrategy::Introspect => extract_introspect(bytes),
            PdfStrategy::TextOnly => extract_text_only(bytes),
        }
    }
}

#[cfg_attr(not(any(feature = "pdf", feature = "pdf-text")), allow(dead_code))]
fn backend_error<E: std::fmt::Display>(e: E) -> ScanError {
    ScanError::Extraction(e.to_string())
}

#[cfg_attr(not(any(feature = "pdf", feature = "pdf-text")), allow(dead_code))]
fn guarded<T, F>(backend: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_) => Err(ScanError::Extraction(format!(
            "{} panicked - likely malformed document",
            backend
        ))),
    }
}

#[cfg(feature = "pdf")]
fn extract_introspect(bytes: &[u8]) -> Result<ExtractionResult> {
    guarded("lopdf", || {
        let doc = Document::load_mem(bytes).map_err(backend_error)?;
        let pages = doc.get_pages();

        let mut text = String::new();
        let mut contains_images = false;
        let mut tables_count = 0u32;

        for (page_number, page_id) in &pages {
            let page_text = doc.extract_text(&[*page_number]).map_err(backend_error)?;
            text.push_str(&page_text);
            text.push('\n');

            let content = doc.get_page_content(*page_id).map_err(backend_error)?;
            let operations = Content::decode(&content).map_err(backend_error)?.operations;
            let operators: Vec<&str> = operations.iter().map(|op| op.operator.as_str()).collect();

            if !contains_images
                && (operators.contains(&"BI") || page_has_image_xobject(&doc, *page_id))
            {
                contains_images = true;
            }
            tables_count += count_ruled_tables(&operators);
        }

        Ok(ExtractionResult {
            text,
            page_count: pages.len() as u32,
            contains_images,
            tables_count,
        })
    })
}

#[cfg(not(feature = "pdf"))]
fn extract_introspect(_bytes: &[u8]) -> Result<ExtractionResult> {
    Err(ScanError::Extraction("lopdf backend not compiled in".to_string()))
}

#[cfg(feature = "pdf-text")]
fn extract_text_only(bytes: &[u8]) -> Result<ExtractionResult> {
    guarded("pdf-extract", || {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(backend_error)?;
        Ok(ExtractionResult {
            text: pages.join("\n"),
            page_count: pages.len() as u32,
            contains_images: false,
            tables_count: 0,
        })
    })
}

#[cfg(not(feature = "pdf-text"))]
fn extract_text_only(_bytes: &[u8]) -> Result<ExtractionResult> {
    Err(ScanError::Extraction("pdf-extract backend not compiled in".to_string()))
}

/// Count runs of at least `MIN_TABLE_RECTS` rectangle operators (`re`) that
/// are not interrupted by a text object (`BT`).
pub fn count_ruled_tables(operators: &[&str]) -> u32 {
    let mut tables = 0;
    let mut rects = 0usize;

    for operator in operators {
        match *operator {
            "re" => rects += 1,
            "BT" => {
                if rects >= MIN_TABLE_RECTS {
                    tables += 1;
                }
                rects = 0;
            }
            _ => {}
        }
    }
    if rects >= MIN_TABLE_RECTS {
        tables += 1;
    }
    tables
}

#[cfg(feature = "pdf")]
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).ok(),
        Err(_) => Some(object),
    }
}

#[cfg(feature = "pdf")]
fn resolve_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, object)?.as_dict().ok()
}

/// Walk the page and its ancestors for an XObject with `/Subtype /Image`
#[cfg(feature = "pdf")]
fn page_has_image_xobject(doc: &Document, page_id: ObjectId) -> bool {
    let mut current = doc.get_dictionary(page_id).ok();
    let mut depth = 0;

    while let Some(dict) = current {
        if let Some(resources) = dict.get(b"Resources").ok().and_then(|r| resolve_dict(doc, r)) {
            if resources_have_image(doc, resources) {
                return true;
            }
        }

        depth += 1;
        if depth >= MAX_RESOURCE_DEPTH {
            break;
        }
        current = dict.get(b"Parent").ok().and_then(|p| resolve_dict(doc, p));
    }
    false
}

#[cfg(feature = "pdf")]
fn resources_have_image(doc: &Document, resources: &Dictionary) -> bool {
    let xobjects = match resources.get(b"XObject").ok().and_then(|x| resolve_dict(doc, x)) {
        Some(xobjects) => xobjects,
        None => return false,
    };

    xobjects.iter().any(|(_, object)| {
        resolve(doc, object)
            .and_then(|o| o.as_stream().ok())
            .and_then(|stream| stream.dict.get(b"Subtype").ok())
            .and_then(|subtype| subtype.as_name().ok())
            .map(|name| name == b"Image")
            .unwrap_or(false)
    })
}
