//! JSON loading utilities for labelme annotation files.

use crate::error::{ReportError, Result};
use crate::types::{AnnotationRecord, LabelFile};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load one annotation file.
///
/// # Arguments
///
/// * `path` - Path to a labelme JSON file
///
/// # Returns
///
/// Returns an `AnnotationRecord` whose `image_filename` is the base name of
/// the file's `imagePath`.
///
/// # Errors
///
/// Returns [`ReportError::Parse`] naming the file if it cannot be opened, is
/// not valid JSON, or lacks `imagePath`, `imageWidth`, `imageHeight` or
/// `shapes`.
///
/// # Example
///
/// ```no_run
/// use pavement_report::loader::load_label_file;
///
/// let record = load_label_file("labels/img001.json").unwrap();
/// println!("{} shapes on {}", record.shapes.len(), record.image_filename);
/// ```
pub fn load_label_file<P: AsRef<Path>>(path: P) -> Result<AnnotationRecord> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ReportError::parse(path, format!("cannot open label file: {}", e)))?;
    let reader = BufReader::new(file);
    let label: LabelFile = serde_json::from_reader(reader)
        .map_err(|e| ReportError::parse(path, e.to_string()))?;

    Ok(label.into())
}

/// Load an annotation from a JSON string.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if the JSON cannot be parsed or a required
/// field is missing.
///
/// # Example
///
/// ```
/// use pavement_report::loader::load_label_from_str;
///
/// let json = r#"{
///     "imagePath": "..\\images\\img001.jpg",
///     "imageWidth": 1920,
///     "imageHeight": 1080,
///     "shapes": [
///         {"label": "kengcao", "points": [[10, 20], [110, 70]], "shape_type": "rectangle"}
///     ]
/// }"#;
/// let record = load_label_from_str(json).unwrap();
/// assert_eq!(record.image_filename, "img001.jpg");
/// assert_eq!(record.shapes.len(), 1);
/// ```
pub fn load_label_from_str(json_str: &str) -> Result<AnnotationRecord> {
    let label: LabelFile = serde_json::from_str(json_str)?;
    Ok(label.into())
}

/// List the `.json` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`ReportError::Parse`] if the directory cannot be read.
pub fn find_label_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry
            .map_err(|e| ReportError::parse(dir, format!("cannot read label directory: {}", e)))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
