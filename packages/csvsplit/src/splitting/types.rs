//! Types reported by the split engine.

use std::path::PathBuf;

/// One finished output part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSummary {
    /// 1-based part index.
    pub index: usize,
    /// Location of the part file.
    pub path: PathBuf,
    /// Data records written, excluding the header.
    pub records: u64,
}

/// Outcome of a completed split run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Parts in creation order. Never empty after a successful run.
    pub parts: Vec<PartSummary>,
    /// Data records read from the input, including skipped ones.
    pub records_read: u64,
    /// Data records written across all parts.
    pub records_written: u64,
    /// Records dropped because every field was empty.
    pub records_skipped: u64,
}

impl SplitSummary {
    /// Number of part files created.
    #[must_use]
    pub fn parts_created(&self) -> usize {
        self.parts.len()
    }

    /// Paths of all part files, in order.
    pub fn part_paths(&self) -> impl Iterator<Item = &std::path::Path> {
        self.parts.iter().map(|p| p.path.as_path())
    }
}
