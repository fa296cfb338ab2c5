use crate::error::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// File names that are ALWAYS skipped, matched case-insensitively
pub const ALWAYS_IGNORE: &[&str] = &[
    // === SYSTEM ===
    "thumbs.db",
    // === OFFICE LOCK FILES ===
    "~$*",
    // === TEMPORARY ===
    "*.tmp",
];

/// Auto-exclusion filter for transient and system files.
///
/// Applied to bare file names before the extension allow-list.
#[derive(Debug, Clone)]
pub struct AutoExclude {
    set: GlobSet,
}

impl AutoExclude {
    /// Build the filter from `ALWAYS_IGNORE`
    pub fn new() -> Result<Self> {
        Ok(Self {
            set: build_globset(ALWAYS_IGNORE)?,
        })
    }

    /// True if a file with this name must be skipped
    pub fn should_ignore(&self, file_name: &str) -> bool {
        self.set.is_match(file_name)
    }
}

/// Build a case-insensitive GlobSet from a slice of pattern strings
pub fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()?;
        builder.add(glob);
    }

    Ok(builder.build()?)
}
