//! Survey and report settings.

use crate::error::{ReportError, Result};
use crate::position::PileKeyFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Positions per segment row.
pub const DEFAULT_SEGMENT_SIZE: usize = 5;

/// Physical distance (m) between consecutive positions.
pub const DEFAULT_PILE_STEP_M: u64 = 2;

/// Settings for one report run.
///
/// Any field missing from a config file takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Distance along the road covered by one image's height, in meters.
    pub real_height_m: f64,
    /// Lateral distance covered by one image's width, in meters.
    pub real_width_m: f64,
    /// Number of consecutive positions aggregated into one segment.
    pub segment_size: usize,
    /// Meters between positions; a segment's start pile sits one step
    /// before its first position.
    pub pile_step_m: u64,
    pub pile_key: PileKeyFormat,
    pub detail_title: String,
    pub segment_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            real_height_m: 2.0,
            real_width_m: 3.75,
            segment_size: DEFAULT_SEGMENT_SIZE,
            pile_step_m: DEFAULT_PILE_STEP_M,
            pile_key: PileKeyFormat::default(),
            detail_title: "路面病害明细表".to_string(),
            segment_title: "路面病害分段统计表".to_string(),
        }
    }
}

impl ReportConfig {
    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] if the file cannot be read or parsed,
    /// and [`ReportError::InvalidConfig`] if the values fail validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ReportError::parse(path, format!("cannot open config: {}", e)))?;
        let config: ReportConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ReportError::parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Physical length of a full segment, in meters.
    pub fn segment_length_m(&self) -> u64 {
        self.segment_size as u64 * self.pile_step_m
    }

    /// Check that the settings can drive a run.
    pub fn validate(&self) -> Result<()> {
        if !(self.real_height_m.is_finite() && self.real_height_m > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "real height must be positive, got {}",
                self.real_height_m
            )));
        }
        if !(self.real_width_m.is_finite() && self.real_width_m > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "real width must be positive, got {}",
                self.real_width_m
            )));
        }
        if self.segment_size == 0 {
            return Err(ReportError::InvalidConfig(
                "segment size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_length_m(), 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"real_height_m": 4.0, "pile_key": {"suffix_width": 1}}"#)
                .unwrap();
        assert_eq!(config.real_height_m, 4.0);
        assert_eq!(config.segment_size, DEFAULT_SEGMENT_SIZE);
        assert_eq!(config.pile_key.suffix_width, 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ReportConfig::default();
        config.segment_size = 0;
        assert!(matches!(config.validate(), Err(ReportError::InvalidConfig(_))));

        let mut config = ReportConfig::default();
        config.real_width_m = 0.0;
        assert!(config.validate().is_err());

        let mut config = ReportConfig::default();
        config.real_height_m = f64::NAN;
        assert!(config.validate().is_err());
    }
}
