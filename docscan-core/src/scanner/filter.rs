use super::config::ScanConfig;
use super::ignore::AutoExclude;
use crate::error::{Result, ScanError};
use crate::extract::file_extension;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A file selected for processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    /// Absolute path
    pub path: PathBuf,
    /// Path components relative to the scan root, file name included
    pub rel_components: Vec<String>,
}

impl FileCandidate {
    /// Final path component
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Resolves include directories against excludes and lists their direct files
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    excludes: Vec<Vec<String>>,
    extensions: Vec<String>,
    auto_exclude: AutoExclude,
}

impl PathFilter {
    /// `root` must exist; it is canonicalized so includes can be checked against it
    pub fn new(root: &Path, excludes: Vec<Vec<String>>, extensions: Vec<String>) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| ScanError::RootNotFound(root.to_path_buf()))?;
        if !root.is_dir() {
            return Err(ScanError::RootNotFound(root));
        }

        Ok(Self {
            root,
            excludes,
            extensions,
            auto_exclude: AutoExclude::new()?,
        })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(
            &config.input_root_path,
            config.exclude_components(),
            config.normalized_extensions(),
        )
    }

    /// Canonical scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Direct files of every include, in include order then directory order
    pub fn gather(&self, includes: &[Vec<String>]) -> Vec<FileCandidate> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for include in includes {
            for candidate in self.gather_include(include) {
                if seen.insert(candidate.path.clone()) {
                    results.push(candidate);
                } else {
                    tracing::debug!("Already gathered, skipped: {}", candidate.path.display());
                }
            }
        }

        tracing::info!("Gathered {} files", results.len());
        results
    }

    fn gather_include(&self, include: &[String]) -> Vec<FileCandidate> {
        let include_root = include.iter().fold(self.root.clone(), |acc, c| acc.join(c));

        if !include_root.exists() {
            tracing::warn!("Include path missing, skipped: {}", include_root.display());
            return vec![];
        }

        let include_root = match include_root.canonicalize() {
            Ok(path) if path.starts_with(&self.root) => path,
            Ok(path) => {
                tracing::warn!("Include path outside root, skipped: {}", path.display());
                return vec![];
            }
            Err(e) => {
                tracing::warn!(
                    "Include path inaccessible, skipped: {} ({})",
                    include_root.display(),
                    e
                );
                return vec![];
            }
        };

        let rel_components = relative_components(&self.root, &include_root);
        if is_excluded(&rel_components, &self.excludes) {
            tracing::info!("Include path excluded, skipped: {}", include_root.display());
            return vec![];
        }

        let mut results = Vec::new();
        let walker = WalkDir::new(&include_root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Cannot access entry under {}: {}", include_root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if self.auto_exclude.should_ignore(&file_name) {
                tracing::info!("Skipped temp file: {}", entry.path().display());
                continue;
            }

            if !self.accepts_extension(entry.path()) {
                tracing::debug!("Extension not allowed, skipped: {}", entry.path().display());
                continue;
            }

            let mut components = rel_components.clone();
            components.push(file_name);
            results.push(FileCandidate {
                path: entry.path().to_path_buf(),
                rel_components: components,
            });
        }

        results
    }

    /// Empty allow-list accepts everything
    pub fn accepts_extension(&self, path: &Path) -> bool {
        self.extensions.is_empty() || self.extensions.contains(&file_extension(path))
    }
}

/// Gather candidate files under `root`
pub fn gather(
    root: &Path,
    includes: &[Vec<String>],
    excludes: &[Vec<String>],
    allowed_exts: &[String],
) -> Result<Vec<FileCandidate>> {
    let filter = PathFilter::new(root, excludes.to_vec(), allowed_exts.to_vec())?;
    Ok(filter.gather(includes))
}

/// True if any exclude appears as a contiguous run anywhere in `rel_components`
pub fn is_excluded(rel_components: &[String], excludes: &[Vec<String>]) -> bool {
    excludes.iter().any(|exclude| {
        !exclude.is_empty()
            && rel_components
                .windows(exclude.len())
                .any(|window| window == exclude.as_slice())
    })
}

fn relative_components(root: &Path, path: &Path) -> Vec<String> {
    path.strip_prefix(root)
        .map(|rel| {
            rel.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
