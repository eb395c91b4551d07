//! The closed set of pavement defect classes.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nominal strip width (m) applied to linear defects measured along their diagonal.
pub const STRIP_WIDTH_M: f64 = 0.2;

/// How a class turns a bounding box into an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFormula {
    /// Full bounding-box area: `length * width`.
    BoundingBox,
    /// Bounding-box area scaled by [`STRIP_WIDTH_M`].
    ScaledBoundingBox,
    /// Diagonal extent times [`STRIP_WIDTH_M`]: `sqrt(length² + width²) * 0.2`.
    DiagonalStrip,
}

impl AreaFormula {
    /// Apply the formula to a measured length and width in meters.
    pub fn area(self, length: f64, width: f64) -> f64 {
        match self {
            AreaFormula::BoundingBox => length * width,
            AreaFormula::ScaledBoundingBox => length * width * STRIP_WIDTH_M,
            AreaFormula::DiagonalStrip => length.hypot(width) * STRIP_WIDTH_M,
        }
    }
}

/// A pavement distress category.
///
/// Each variant owns its annotation id, its localized report name, and its
/// area formula, so the three can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefectClass {
    #[serde(rename = "kuaizhuangliefeng")]
    BlockCrack,
    #[serde(rename = "hengxiangliefeng")]
    TransverseCrack,
    #[serde(rename = "tiaozhuangxiubu")]
    StripPatch,
    #[serde(rename = "kuaizhuangxiubu")]
    BlockPatch,
    #[serde(rename = "zongxiangliefeng")]
    LongitudinalCrack,
    #[serde(rename = "junlie")]
    AlligatorCrack,
    #[serde(rename = "kengcao")]
    Pothole,
}

impl DefectClass {
    /// Number of known classes.
    pub const COUNT: usize = 7;

    /// Every class, in report column order.
    pub const ALL: [DefectClass; DefectClass::COUNT] = [
        DefectClass::BlockCrack,
        DefectClass::TransverseCrack,
        DefectClass::StripPatch,
        DefectClass::BlockPatch,
        DefectClass::LongitudinalCrack,
        DefectClass::AlligatorCrack,
        DefectClass::Pothole,
    ];

    /// The label used for this class in annotation files.
    pub fn id(self) -> &'static str {
        match self {
            DefectClass::BlockCrack => "kuaizhuangliefeng",
            DefectClass::TransverseCrack => "hengxiangliefeng",
            DefectClass::StripPatch => "tiaozhuangxiubu",
            DefectClass::BlockPatch => "kuaizhuangxiubu",
            DefectClass::LongitudinalCrack => "zongxiangliefeng",
            DefectClass::AlligatorCrack => "junlie",
            DefectClass::Pothole => "kengcao",
        }
    }

    /// The name printed in the report.
    pub fn localized_name(self) -> &'static str {
        match self {
            DefectClass::BlockCrack => "块状裂缝",
            DefectClass::TransverseCrack => "横向裂缝",
            DefectClass::StripPatch => "条状修补",
            DefectClass::BlockPatch => "块状修补",
            DefectClass::LongitudinalCrack => "纵向裂缝",
            DefectClass::AlligatorCrack => "龟裂",
            DefectClass::Pothole => "坑槽",
        }
    }

    pub fn formula(self) -> AreaFormula {
        match self {
            DefectClass::BlockCrack | DefectClass::AlligatorCrack | DefectClass::Pothole => {
                AreaFormula::BoundingBox
            }
            DefectClass::BlockPatch => AreaFormula::ScaledBoundingBox,
            DefectClass::TransverseCrack
            | DefectClass::StripPatch
            | DefectClass::LongitudinalCrack => AreaFormula::DiagonalStrip,
        }
    }

    /// Area in square meters for a defect of this class.
    ///
    /// # Example
    ///
    /// ```
    /// use pavement_report::measure::DefectClass;
    ///
    /// let area = DefectClass::TransverseCrack.area(3.0, 4.0);
    /// assert!((area - 1.0).abs() < 1e-12);
    /// ```
    pub fn area(self, length: f64, width: f64) -> f64 {
        self.formula().area(length, width)
    }

    /// Position of this class in [`DefectClass::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for DefectClass {
    type Err = ReportError;

    fn from_str(label: &str) -> Result<Self> {
        DefectClass::ALL
            .into_iter()
            .find(|class| class.id() == label)
            .ok_or_else(|| ReportError::UnknownDefectClass {
                label: label.to_string(),
            })
    }
}

impl fmt::Display for DefectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.localized_name())
    }
}

/// Area totals keyed by every known class.
///
/// Backed by a fixed array, so a total exists for each class from the moment
/// the value is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassAreas([f64; DefectClass::COUNT]);

impl ClassAreas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: DefectClass, area: f64) {
        self.0[class.index()] += area;
    }

    pub fn get(&self, class: DefectClass) -> f64 {
        self.0[class.index()]
    }

    /// Sum over all classes.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(class, area)` pairs in report column order.
    pub fn iter(&self) -> impl Iterator<Item = (DefectClass, f64)> + '_ {
        DefectClass::ALL.into_iter().map(move |class| (class, self.get(class)))
    }
}
