//! # pavement-report
//!
//! A Rust library that turns per-image pavement distress annotations into an
//! engineering report keyed by survey pile (chainage) positions.
//!
//! The pipeline:
//! - **Position index**: map pile numbers to the images taken there
//! - **Label loading**: parse labelme JSON files into shapes and image sizes
//! - **Scale resolution**: derive meters per pixel from the image resolution
//!   and the real-world footprint of one image
//! - **Defect measurement**: length, width and class-specific area per shape
//! - **Segment aggregation**: area totals per class over runs of positions
//! - **Report assembly**: a defect detail table and a per-segment table,
//!   written to a spreadsheet
//!
//! ## Quick Start
//!
//! ```rust
//! use pavement_report::config::ReportConfig;
//! use pavement_report::loader::load_label_from_str;
//! use pavement_report::pipeline::build_report;
//! use pavement_report::position::{PileKeyFormat, PositionIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = PositionIndex::parse(
//!     "0+000.000->img001.jpg->a\n0+002.000->img002.jpg->b\n",
//!     &PileKeyFormat::default(),
//! );
//! let record = load_label_from_str(r#"{
//!     "imagePath": "img002.jpg",
//!     "imageWidth": 1920,
//!     "imageHeight": 1080,
//!     "shapes": [{"label": "kengcao", "points": [[100, 100], [300, 200]]}]
//! }"#)?;
//!
//! let config = ReportConfig { real_height_m: 2.0, real_width_m: 5.0, ..Default::default() };
//! let data = build_report(&index, vec![record], &config)?;
//! assert_eq!(data.entries.len(), 1);
//! assert_eq!(data.segments.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Input formats
//!
//! The position index is line oriented, with three `->` separated fields:
//!
//! ```text
//! 12+345.000m->img001.jpg->...
//! ```
//!
//! Annotations are labelme JSON files:
//!
//! ```json
//! {
//!   "imagePath": "img001.jpg",
//!   "imageWidth": 1920,
//!   "imageHeight": 1080,
//!   "shapes": [
//!     {"label": "hengxiangliefeng", "points": [[x1, y1], [x2, y2]]}
//!   ]
//! }
//! ```

pub mod error;
pub mod types;
pub mod position;
pub mod loader;
pub mod measure;
pub mod segment;
pub mod stats;
pub mod config;
pub mod report;
pub mod writer;
pub mod pipeline;

// Re-export commonly used types and functions
pub use error::{ReportError, Result};
pub use types::{AnnotationRecord, DefectEntry, Measurement, RawShape, SegmentSummary};
pub use position::{PileKey, PileKeyFormat, PositionEntry, PositionIndex};
pub use loader::{find_label_files, load_label_file, load_label_from_str};
pub use measure::{measure_shape, resolve_scale, ClassAreas, DefectClass, Scale};
pub use config::ReportConfig;
pub use pipeline::{build_report, generate_report, ReportData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        // Basic smoke test to ensure the library compiles
        let scale = resolve_scale(100.0, 100.0, 1.0, 1.0).unwrap();
        let shape = RawShape::new("kengcao", [0.0, 0.0], [10.0, 10.0]);
        assert!(measure_shape(&shape, &scale).is_ok());
    }
}
