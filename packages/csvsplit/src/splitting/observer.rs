//! Progress hooks for a split run.

use std::path::Path;

use super::types::PartSummary;

/// Receives progress events while the engine runs.
///
/// All methods default to doing nothing. Observers only watch; they cannot
/// change what gets written.
pub trait SplitObserver {
    /// A new part file was created and its header written.
    fn part_created(&mut self, _index: usize, _path: &Path) {}

    /// A part was flushed and closed.
    fn part_finished(&mut self, _part: &PartSummary) {}

    /// A data record was written. `line` is its 1-based input record line.
    fn record_written(&mut self, _line: u64) {}

    /// An all-empty record was dropped.
    fn record_skipped(&mut self, _line: u64) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SplitObserver for NoopObserver {}
