//! Error types for docscan operations

use std::path::PathBuf;
use thiserror::Error;

/// Docscan error types
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Config must define a JSON/YAML object")]
    ConfigNotObject,

    #[error("Root path not found or inaccessible: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

/// Result type for docscan operations
pub type Result<T> = std::result::Result<T, ScanError>;

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        ScanError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for ScanError {
    fn from(e: serde_yaml::Error) -> Self {
        ScanError::ConfigParse(e.to_string())
    }
}

impl From<zip::result::ZipError> for ScanError {
    fn from(e: zip::result::ZipError) -> Self {
        ScanError::Extraction(e.to_string())
    }
}
