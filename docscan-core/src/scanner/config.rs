use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scan settings, usually loaded from a JSON or YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root of the file share to scan
    pub input_root_path: PathBuf,
    /// Directories under the root whose direct files are scanned
    #[serde(default, alias = "include_folders")]
    pub include_paths: Vec<String>,
    /// Path-component sequences to skip wherever they appear
    #[serde(default, alias = "exclude_folders")]
    pub exclude_paths: Vec<String>,
    /// Extension allow-list (case-insensitive, no dot); empty accepts all
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
    /// Free-form tag copied into every record
    #[serde(default)]
    pub tag: String,
    /// Free-form domain copied into every record
    #[serde(default)]
    pub domain: String,
}

impl ScanConfig {
    /// Create a config for `root` with no includes, excludes or filters
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            input_root_path: root.into(),
            include_paths: vec![],
            exclude_paths: vec![],
            allowed_extensions: vec![],
            tag: String::new(),
            domain: String::new(),
        }
    }

    /// Load a config file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScanError::ConfigNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        let raw_text = String::from_utf8_lossy(&bytes);

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "yaml" | "yml"))
            .unwrap_or(false);

        let mut config = if is_yaml {
            Self::from_yaml_str(&raw_text)?
        } else {
            Self::from_json_str(&raw_text)?
        };
        config.tag = config.tag.trim().to_string();
        config.domain = config.domain.trim().to_string();
        Ok(config)
    }

    /// Parse a JSON document; the top level must be an object
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ScanError::ConfigParse(e.to_string()))?;
        if !value.is_object() {
            return Err(ScanError::ConfigNotObject);
        }
        serde_json::from_value(value).map_err(|e| ScanError::ConfigParse(e.to_string()))
    }

    /// Parse a YAML document; the top level must be a mapping
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        if !value.is_mapping() {
            return Err(ScanError::ConfigNotObject);
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Set include paths
    pub fn with_includes<S: Into<String>>(mut self, includes: Vec<S>) -> Self {
        self.include_paths = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Set exclude paths
    pub fn with_excludes<S: Into<String>>(mut self, excludes: Vec<S>) -> Self {
        self.exclude_paths = excludes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the extension allow-list
    pub fn with_extensions<S: Into<String>>(mut self, extensions: Vec<S>) -> Self {
        self.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tag
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the domain
    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = domain.into();
        self
    }

    /// Include entries as component lists; the root itself when none are given
    pub fn include_components(&self) -> Vec<Vec<String>> {
        let includes = normalize_entries(&self.include_paths);
        if includes.is_empty() {
            vec![vec![]]
        } else {
            includes
        }
    }

    /// Exclude entries as component lists
    pub fn exclude_components(&self) -> Vec<Vec<String>> {
        normalize_entries(&self.exclude_paths)
    }

    /// Lower-cased extensions without leading dots
    pub fn normalized_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = Vec::new();
        for ext in &self.allowed_extensions {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        extensions
    }
}

/// Split entries on `/` or `\`, dropping blanks and empty components
pub fn normalize_entries(entries: &[String]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| split_components(entry))
        .filter(|components| !components.is_empty())
        .collect()
}

/// `" /Clienti\\2024/ "` -> `["Clienti", "2024"]`
pub fn split_components(entry: &str) -> Vec<String> {
    entry
        .trim()
        .split(|c: char| c == '/' || c == '\\')
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ".")
        .map(str::to_string)
        .collect()
}
