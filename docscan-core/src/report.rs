//! Scan driver and report output

use crate::error::Result;
use crate::processor::{FileProcessor, FileRecord};
use crate::scanner::{FileCandidate, PathFilter, ScanConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregate output of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Final component of the scan root, or `"unknown"`
    pub cliente: String,
    /// Always `files.len()`
    pub count: usize,
    pub files: Vec<FileRecord>,
}

impl ScanReport {
    pub fn new<S: Into<String>>(cliente: S, files: Vec<FileRecord>) -> Self {
        Self {
            cliente: cliente.into(),
            count: files.len(),
            files,
        }
    }

    /// Indented JSON with non-ASCII characters kept as-is
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Output saved to: {}", path.display());
        Ok(())
    }
}

/// Runs the file processor over gathered candidates
#[derive(Debug, Clone, Default)]
pub struct ScanDriver {
    processor: FileProcessor,
}

impl ScanDriver {
    pub fn new(processor: FileProcessor) -> Self {
        Self { processor }
    }

    /// Process `candidates` strictly in order
    pub fn run(
        &self,
        root: &Path,
        candidates: &[FileCandidate],
        tag: &str,
        domain: &str,
    ) -> ScanReport {
        let files: Vec<FileRecord> = candidates
            .iter()
            .map(|candidate| self.processor.process(&candidate.path, tag, domain))
            .collect();

        ScanReport::new(cliente_for(root), files)
    }

    /// Gather files per `config` and process them
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanReport> {
        let filter = PathFilter::from_config(config)?;
        let includes = config.include_components();
        let excludes = config.exclude_components();
        let extensions = config.normalized_extensions();

        tracing::info!("Scanning root: {}", filter.root().display());
        tracing::info!("Including: {}", describe_entries(&includes));
        tracing::info!("Excluding: {}", describe_entries(&excludes));
        tracing::info!("Extensions: {}", describe_list(&extensions));
        tracing::info!("Backends: {}", self.processor.backends().describe());

        let candidates = filter.gather(&includes);
        Ok(self.run(filter.root(), &candidates, &config.tag, &config.domain))
    }
}

/// Final path component of `root`, or `"unknown"` when there is none
pub fn cliente_for(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

fn describe_entries(entries: &[Vec<String>]) -> String {
    let joined: Vec<String> = entries
        .iter()
        .map(|components| {
            if components.is_empty() {
                ".".to_string()
            } else {
                components.join("/")
            }
        })
        .collect();
    describe_list(&joined)
}

fn describe_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
