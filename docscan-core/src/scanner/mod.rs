//! Scanner Module
//!
//! Turns a `ScanConfig` into an ordered list of files to process:
//! - Include roots resolved under the scan root
//! - Sliding-window exclusion on path components
//! - Automatic exclusion of lock, temp and system files
//! - Extension allow-list

mod config;
mod filter;
mod ignore;

pub use config::{normalize_entries, split_components, ScanConfig};
pub use filter::{gather, is_excluded, FileCandidate, PathFilter};
pub use ignore::{build_globset, AutoExclude, ALWAYS_IGNORE};
