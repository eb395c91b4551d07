//! Statistics tracking for report runs
//!
//! This module counts what a run read, matched, measured and dropped, so that
//! analysts can audit gaps in coverage between the labels and the file index.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Statistics collected while building a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Number of positions in the file index
    pub positions: usize,

    /// Non-blank index lines skipped for not having three fields
    pub malformed_index_lines: usize,

    /// Number of label files read
    pub label_files: usize,

    /// Label files whose image was found in the index
    pub matched_records: usize,

    /// Label files dropped because their image has no position
    pub dropped_unmapped: usize,

    /// Shapes turned into defect entries
    pub shapes_measured: usize,

    /// Positions with at least one label file
    pub annotated_positions: usize,

    /// Segment rows emitted
    pub segments: usize,
}

impl ReportStats {
    /// Create a new `ReportStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label file read from disk
    pub fn add_label_file(&mut self) {
        self.label_files += 1;
    }

    /// Record a label file matched to a position
    pub fn match_record(&mut self) {
        self.matched_records += 1;
    }

    /// Record a label file dropped for lack of a position
    pub fn drop_unmapped(&mut self) {
        self.dropped_unmapped += 1;
    }

    /// Record measured shapes
    pub fn add_shapes(&mut self, count: usize) {
        self.shapes_measured += count;
    }

    /// Share of index positions that carry annotations, in [0, 1]
    pub fn coverage(&self) -> f64 {
        if self.positions == 0 {
            return 0.0;
        }
        self.annotated_positions as f64 / self.positions as f64
    }

    /// Log a summary of the run
    pub fn log_summary(&self) {
        info!(
            positions = self.positions,
            malformed_index_lines = self.malformed_index_lines,
            label_files = self.label_files,
            matched = self.matched_records,
            dropped_unmapped = self.dropped_unmapped,
            shapes = self.shapes_measured,
            segments = self.segments,
            "report statistics"
        );
        info!("index coverage: {:.1}%", self.coverage() * 100.0);
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "ReportStats {{ positions: {}, label_files: {}, matched: {}, dropped_unmapped: {}, shapes: {}, segments: {} }}",
            self.positions,
            self.label_files,
            self.matched_records,
            self.dropped_unmapped,
            self.shapes_measured,
            self.segments
        )
    }
}
