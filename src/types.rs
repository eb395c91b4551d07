//! Core data types for annotations, measurements and segment summaries.

use crate::error::{ReportError, Result};
use crate::measure::{ClassAreas, DefectClass};
use crate::position::PileKey;
use serde::{Deserialize, Serialize};

/// One annotated shape as it appears in a label file.
///
/// Points are `[x, y]` pixel coordinates. Only the first two are used, as the
/// opposite corners of a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShape {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

impl RawShape {
    /// Create a shape from a class label and two corner points.
    pub fn new(label: impl Into<String>, p1: [f64; 2], p2: [f64; 2]) -> Self {
        Self {
            label: label.into(),
            points: vec![p1, p2],
        }
    }

    /// The two corner points of the shape.
    pub fn corners(&self) -> Result<([f64; 2], [f64; 2])> {
        match self.points.as_slice() {
            [p1, p2, ..] => Ok((*p1, *p2)),
            _ => Err(ReportError::InvalidShape(format!(
                "shape {:?} needs two points, got {}",
                self.label,
                self.points.len()
            ))),
        }
    }
}

/// The subset of a labelme JSON file the report reads.
///
/// Unknown fields (`imageData`, `flags`, `shape_type`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelFile {
    pub image_path: String,
    pub image_width: f64,
    pub image_height: f64,
    pub shapes: Vec<RawShape>,
}

/// A parsed annotation for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    /// Base file name of the annotated image.
    pub image_filename: String,
    pub image_width: f64,
    pub image_height: f64,
    pub shapes: Vec<RawShape>,
}

impl From<LabelFile> for AnnotationRecord {
    fn from(file: LabelFile) -> Self {
        Self {
            image_filename: base_filename(&file.image_path).to_string(),
            image_width: file.image_width,
            image_height: file.image_height,
            shapes: file.shapes,
        }
    }
}

/// Reduce a path written by the annotation tool to its file name.
///
/// Both `/` and `\` are treated as separators.
pub fn base_filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Real-world dimensions of one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub class: DefectClass,
    pub length_m: f64,
    pub width_m: f64,
    pub area_m2: f64,
}

impl Measurement {
    /// Attach a pile position, producing a report row.
    pub fn at(self, pile: PileKey) -> DefectEntry {
        DefectEntry {
            pile,
            class: self.class,
            length_m: self.length_m,
            width_m: self.width_m,
            area_m2: self.area_m2,
        }
    }
}

/// One row of the defect detail table.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectEntry {
    pub pile: PileKey,
    pub class: DefectClass,
    pub length_m: f64,
    pub width_m: f64,
    pub area_m2: f64,
}

impl DefectEntry {
    /// Localized defect name shown in the report.
    pub fn defect_name(&self) -> &'static str {
        self.class.localized_name()
    }
}

/// Area totals for one run of consecutive positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub start_pile: PileKey,
    pub end_pile: PileKey,
    pub area_by_class: ClassAreas,
    /// Index range `[first, last]` of the positions this segment covers.
    pub first_position: usize,
    pub last_position: usize,
}

impl SegmentSummary {
    /// Number of positions in the segment.
    pub fn position_count(&self) -> usize {
        self.last_position - self.first_position + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_filename() {
        assert_eq!(base_filename("img001.jpg"), "img001.jpg");
        assert_eq!(base_filename("../images/img001.jpg"), "img001.jpg");
        assert_eq!(base_filename("..\\images\\img001.jpg"), "img001.jpg");
        assert_eq!(base_filename("C:\\survey/day1\\img001.jpg"), "img001.jpg");
    }

    #[test]
    fn test_corners_use_first_two_points() {
        let shape = RawShape {
            label: "kengcao".to_string(),
            points: vec![[0.0, 0.0], [10.0, 5.0], [99.0, 99.0]],
        };
        assert_eq!(shape.corners().unwrap(), ([0.0, 0.0], [10.0, 5.0]));
    }

    #[test]
    fn test_corners_need_two_points() {
        let shape = RawShape {
            label: "kengcao".to_string(),
            points: vec![[0.0, 0.0]],
        };
        assert!(matches!(shape.corners(), Err(ReportError::InvalidShape(_))));
    }
}
