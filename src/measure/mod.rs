//! Measurement of annotated defects in real-world units.

pub mod class;
pub mod scale;
pub mod defect;

pub use class::{AreaFormula, ClassAreas, DefectClass, STRIP_WIDTH_M};
pub use scale::{resolve_scale, Scale};
pub use defect::{measure_shape, measure_shapes};
