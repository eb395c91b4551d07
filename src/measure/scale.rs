//! Pixel to meter conversion for one annotated image.

use crate::error::{ReportError, Result};

/// Meters per pixel along each image axis.
///
/// The image height spans the travel direction, so it drives `length_scale`;
/// the image width spans the lane, so it drives `width_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub length_scale: f64,
    pub width_scale: f64,
}

/// Resolve the scale factors for an image.
///
/// # Arguments
///
/// * `annotated_width` - Image width in pixels, as recorded in the annotation
/// * `annotated_height` - Image height in pixels
/// * `real_height_m` - Physical distance covered by the image height
/// * `real_width_m` - Physical distance covered by the image width
///
/// # Errors
///
/// Returns [`ReportError::ScaleResolution`] if any dimension is zero,
/// negative, or not finite.
///
/// # Example
///
/// ```
/// use pavement_report::measure::resolve_scale;
///
/// let scale = resolve_scale(1920.0, 1080.0, 2.0, 5.0).unwrap();
/// assert_eq!(scale.length_scale, 2.0 / 1080.0);
/// assert_eq!(scale.width_scale, 5.0 / 1920.0);
/// ```
pub fn resolve_scale(
    annotated_width: f64,
    annotated_height: f64,
    real_height_m: f64,
    real_width_m: f64,
) -> Result<Scale> {
    ensure_positive("annotated width", annotated_width)?;
    ensure_positive("annotated height", annotated_height)?;
    ensure_positive("real height", real_height_m)?;
    ensure_positive("real width", real_width_m)?;

    Ok(Scale {
        length_scale: real_height_m / annotated_height,
        width_scale: real_width_m / annotated_width,
    })
}

fn ensure_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReportError::ScaleResolution(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}
