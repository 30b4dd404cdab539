//! Pass statistics.

use serde::Serialize;
use tracing::info;

/// Counters collected over one augmentation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriverReport {
    /// File records pulled from the corpus, malformed ones included.
    pub entries: usize,
    /// Records that could not be deserialized.
    pub malformed_entries: usize,
    /// Records excluded by the library filter.
    pub filtered_entries: usize,
    /// Theorems, blocks and trees replaced by recorded failures.
    pub skipped_placeholders: usize,
    /// Tree nodes visited.
    pub nodes_visited: usize,
    /// Visited nodes without a recorded state.
    pub nodes_without_state: usize,
    /// Nodes whose state was rewritten and emitted.
    pub nodes_augmented: usize,
    /// Nodes abandoned because a transformer failed.
    pub nodes_failed: usize,
    /// Whether the pass stopped on an interrupt.
    pub interrupted: bool,
}

impl DriverReport {
    /// Adds another worker's counters to this one.
    pub const fn merge(&mut self, other: &Self) {
        self.entries += other.entries;
        self.malformed_entries += other.malformed_entries;
        self.filtered_entries += other.filtered_entries;
        self.skipped_placeholders += other.skipped_placeholders;
        self.nodes_visited += other.nodes_visited;
        self.nodes_without_state += other.nodes_without_state;
        self.nodes_augmented += other.nodes_augmented;
        self.nodes_failed += other.nodes_failed;
        self.interrupted |= other.interrupted;
    }

    /// Logs the counters at `info` level.
    pub fn log_summary(&self) {
        info!(
            entries = self.entries,
            malformed = self.malformed_entries,
            filtered = self.filtered_entries,
            placeholders = self.skipped_placeholders,
            visited = self.nodes_visited,
            without_state = self.nodes_without_state,
            augmented = self.nodes_augmented,
            failed = self.nodes_failed,
            interrupted = self.interrupted,
            "augmentation pass finished"
        );
    }
}
