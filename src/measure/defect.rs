//! Conversion of annotated shapes into real-world defect dimensions.

use crate::error::Result;
use crate::measure::class::DefectClass;
use crate::measure::scale::Scale;
use crate::types::{Measurement, RawShape};
use tracing::debug;

/// Measure one annotated shape.
///
/// The two points are taken as opposite corners of a bounding box:
/// `length = |x1 - x2| * length_scale` and `width = |y1 - y2| * width_scale`.
/// The area then follows the formula of the shape's [`DefectClass`].
///
/// # Errors
///
/// Returns [`crate::ReportError::UnknownDefectClass`] when the label is not a
/// known class, and [`crate::ReportError::InvalidShape`] when the shape has
/// fewer than two points.
///
/// # Example
///
/// ```
/// use pavement_report::measure::{measure_shape, Scale};
/// use pavement_report::types::RawShape;
///
/// let shape = RawShape::new("kengcao", [0.0, 0.0], [100.0, 50.0]);
/// let scale = Scale { length_scale: 0.01, width_scale: 0.02 };
/// let m = measure_shape(&shape, &scale).unwrap();
/// assert!((m.area_m2 - 1.0).abs() < 1e-12);
/// ```
pub fn measure_shape(shape: &RawShape, scale: &Scale) -> Result<Measurement> {
    let class: DefectClass = shape.label.parse()?;
    let ([x1, y1], [x2, y2]) = shape.corners()?;
    if shape.points.len() > 2 {
        debug!(
            label = %shape.label,
            points = shape.points.len(),
            "using the first two points of the shape"
        );
    }

    let length_m = (x1 - x2).abs() * scale.length_scale;
    let width_m = (y1 - y2).abs() * scale.width_scale;

    Ok(Measurement {
        class,
        length_m,
        width_m,
        area_m2: class.area(length_m, width_m),
    })
}

/// Measure every shape of an image, preserving shape order.
pub fn measure_shapes(shapes: &[RawShape], scale: &Scale) -> Result<Vec<Measurement>> {
    shapes.iter().map(|shape| measure_shape(shape, scale)).collect()
}
