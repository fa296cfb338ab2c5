//! DOCX extraction
//!
//! Body text and tables come from docx-rs. Image detection inspects the OPC
//! package directly: the main part's relationships are resolved to part
//! names and looked up in `[Content_Types].xml`.

#![cfg_attr(not(feature = "docx"), allow(dead_code))]

use super::ExtractionResult;
use crate::error::{Result, ScanError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Paragraphs assumed per page; DOCX has no page model to read from
pub const PARAGRAPHS_PER_PAGE: usize = 40;

const DEFAULT_MAIN_PART: &str = "word/document.xml";

static ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:\w+:)?(Relationship|Default|Override)\b[^>]*>").expect("valid regex")
});

/// `name="value"` or `name='value'`
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w:]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

#[cfg(feature = "docx")]
pub(crate) fn extract_docx(path: &Path) -> Result<ExtractionResult> {
    use docx_rs::DocumentChild;

    let bytes = std::fs::read(path)?;
    let doc = docx_rs::read_docx(&bytes).map_err(|e| ScanError::Extraction(e.to_string()))?;

    let mut paragraphs = Vec::new();
    let mut paragraph_count = 0usize;
    let mut tables_count = 0u32;

    for child in &doc.document.children {
        match child {
            DocumentChild::Paragraph(para) => {
                paragraph_count += 1;
                let text = paragraph_text(para);
                if !text.trim().is_empty() {
                    paragraphs.push(text);
                }
            }
            DocumentChild::Table(_) => tables_count += 1,
            _ => {}
        }
    }

    let contains_images = package_contains_images(&bytes)?;

    Ok(ExtractionResult {
        text: paragraphs.join("\n"),
        page_count: estimate_pages(paragraph_count),
        contains_images,
        tables_count,
    })
}

#[cfg(not(feature = "docx"))]
pub(crate) fn extract_docx(_path: &Path) -> Result<ExtractionResult> {
    Err(ScanError::Extraction("DOCX backend not compiled in".to_string()))
}

#[cfg(feature = "docx")]
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    use docx_rs::ParagraphChild;

    let mut output = String::new();
    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, &mut output),
            ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let ParagraphChild::Run(run) = link_child {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

#[cfg(feature = "docx")]
fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    use docx_rs::RunChild;

    for run_child in &run.children {
        match run_child {
            RunChild::Text(text) => output.push_str(&text.text),
            RunChild::Tab(_) => output.push('\t'),
            _ => {}
        }
    }
}

/// `max(1, paragraphs / PARAGRAPHS_PER_PAGE)`
pub(crate) fn estimate_pages(paragraph_count: usize) -> u32 {
    (paragraph_count / PARAGRAPHS_PER_PAGE).max(1) as u32
}

/// True when a relationship of the main document part targets an `image/*` part
pub(crate) fn package_contains_images(bytes: &[u8]) -> Result<bool> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let content_types = match read_entry(&mut archive, "[Content_Types].xml")? {
        Some(xml) => ContentTypes::parse(&xml),
        None => return Ok(false),
    };

    let main_part = read_entry(&mut archive, "_rels/.rels")?
        .and_then(|xml| main_document_part(&xml))
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

    let rels_xml = match read_entry(&mut archive, &rels_path_for(&main_part))? {
        Some(xml) => xml,
        None => return Ok(false),
    };

    let has_image = internal_targets(&rels_xml)
        .iter()
        .map(|target| resolve_target(&main_part, target))
        .filter_map(|part| content_types.lookup(&part))
        .any(|content_type| content_type.starts_with("image/"));

    Ok(has_image)
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

/// Attribute map of every `Relationship` / `Default` / `Override` element
fn elements<'a>(xml: &'a str, name: &str) -> Vec<HashMap<&'a str, &'a str>> {
    ELEMENT
        .captures_iter(xml)
        .filter(|caps| &caps[1] == name)
        .map(|caps| {
            let tag = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            ATTRIBUTE
                .captures_iter(tag)
                .filter_map(|attr| {
                    let value = attr.get(2).or_else(|| attr.get(3))?;
                    Some((attr.get(1)?.as_str(), value.as_str()))
                })
                .collect()
        })
        .collect()
}

/// Part name of the officeDocument relationship in `_rels/.rels`
fn main_document_part(package_rels: &str) -> Option<String> {
    elements(package_rels, "Relationship")
        .into_iter()
        .find(|attrs| {
            attrs
                .get("Type")
                .map(|t| t.ends_with("/officeDocument"))
                .unwrap_or(false)
        })
        .and_then(|attrs| attrs.get("Target").map(|t| t.trim_start_matches('/').to_string()))
}

fn internal_targets(rels_xml: &str) -> Vec<String> {
    elements(rels_xml, "Relationship")
        .into_iter()
        .filter(|attrs| attrs.get("TargetMode").map(|m| *m != "External").unwrap_or(true))
        .filter_map(|attrs| attrs.get("Target").map(|t| t.to_string()))
        .collect()
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against its source part; result has no leading `/`
fn resolve_target(source_part: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        match source_part.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').collect(),
            None => Vec::new(),
        }
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// `[Content_Types].xml` lookup table
#[derive(Debug, Default)]
struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    fn parse(xml: &str) -> Self {
        let mut types = Self::default();
        for attrs in elements(xml, "Default") {
            if let (Some(ext), Some(ct)) = (attrs.get("Extension"), attrs.get("ContentType")) {
                types.defaults.insert(ext.to_lowercase(), ct.to_string());
            }
        }
        for attrs in elements(xml, "Override") {
            if let (Some(part), Some(ct)) = (attrs.get("PartName"), attrs.get("ContentType")) {
                types
                    .overrides
                    .insert(part.trim_start_matches('/').to_lowercase(), ct.to_string());
            }
        }
        types
    }

    fn lookup(&self, part: &str) -> Option<&str> {
        let key = part.to_lowercase();
        if let Some(ct) = self.overrides.get(&key) {
            return Some(ct.as_str());
        }
        let ext = key.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults.get(ext).map(|ct| ct.as_str())
    }
}
