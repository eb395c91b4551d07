//! Assembly of report rows into Polars DataFrames.
//!
//! The detail table and the segment table are both plain DataFrames with
//! localized column names; [`crate::writer`] lays them out as sheets.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::measure::DefectClass;
use crate::types::{DefectEntry, SegmentSummary};
use polars::prelude::*;

pub const SEQUENCE_COLUMN: &str = "序号";
pub const PILE_COLUMN: &str = "桩号";
pub const DEFECT_NAME_COLUMN: &str = "病害名称";
pub const LENGTH_COLUMN: &str = "长度(m)";
pub const WIDTH_COLUMN: &str = "宽度(m)";
pub const AREA_COLUMN: &str = "面积(㎡)";
pub const START_PILE_COLUMN: &str = "起点";
pub const END_PILE_COLUMN: &str = "终点";

/// Sheet holding one row per defect.
pub const DETAIL_SHEET: &str = "defect detail";
/// Sheet holding one row per segment.
pub const SEGMENT_SHEET: &str = "per-segment statistic";

/// Columns of the detail table, in order.
pub const DETAIL_COLUMNS: [&str; 6] = [
    SEQUENCE_COLUMN,
    PILE_COLUMN,
    DEFECT_NAME_COLUMN,
    LENGTH_COLUMN,
    WIDTH_COLUMN,
    AREA_COLUMN,
];

/// A titled table bound for one sheet.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub sheet_name: String,
    /// Text of the merged row above the header.
    pub title: String,
    pub frame: DataFrame,
}

/// Both tables of a report.
#[derive(Debug, Clone)]
pub struct ReportTables {
    pub detail: ReportTable,
    pub segments: ReportTable,
}

impl ReportTables {
    /// Tables in sheet order.
    pub fn tables(&self) -> [&ReportTable; 2] {
        [&self.detail, &self.segments]
    }

    /// Check that both frames still carry the report columns in sheet order.
    pub fn validate(&self) -> Result<()> {
        validate_columns(&self.detail.frame, &DETAIL_COLUMNS)?;
        validate_columns(&self.segments.frame, &segment_columns())
    }
}

/// Columns of the segment table, in order.
pub fn segment_columns() -> Vec<&'static str> {
    let mut columns = vec![START_PILE_COLUMN, END_PILE_COLUMN];
    columns.extend(DefectClass::ALL.iter().map(|class| class.localized_name()));
    columns
}

fn row_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        ReportError::InvalidDataFrame(format!("{} defect rows do not fit the 序号 column", len))
    })
}

/// Build the defect detail table, numbering rows from 1.
pub fn detail_frame(entries: &[DefectEntry]) -> Result<DataFrame> {
    let sequence: Vec<u32> = (1..=row_count(entries.len())?).collect();
    let piles: Vec<&str> = entries.iter().map(|e| e.pile.as_str()).collect();
    let names: Vec<&str> = entries.iter().map(|e| e.defect_name()).collect();
    let lengths: Vec<f64> = entries.iter().map(|e| e.length_m).collect();
    let widths: Vec<f64> = entries.iter().map(|e| e.width_m).collect();
    let areas: Vec<f64> = entries.iter().map(|e| e.area_m2).collect();

    let df = DataFrame::new(vec![
        Column::new(SEQUENCE_COLUMN.into(), sequence),
        Column::new(PILE_COLUMN.into(), piles),
        Column::new(DEFECT_NAME_COLUMN.into(), names),
        Column::new(LENGTH_COLUMN.into(), lengths),
        Column::new(WIDTH_COLUMN.into(), widths),
        Column::new(AREA_COLUMN.into(), areas),
    ])?;

    Ok(df)
}

/// Build the per-segment table, one area column per defect class.
pub fn segment_frame(segments: &[SegmentSummary]) -> Result<DataFrame> {
    let starts: Vec<&str> = segments.iter().map(|s| s.start_pile.as_str()).collect();
    let ends: Vec<&str> = segments.iter().map(|s| s.end_pile.as_str()).collect();

    let mut columns = vec![
        Column::new(START_PILE_COLUMN.into(), starts),
        Column::new(END_PILE_COLUMN.into(), ends),
    ];
    for class in DefectClass::ALL {
        let areas: Vec<f64> = segments.iter().map(|s| s.area_by_class.get(class)).collect();
        columns.push(Column::new(class.localized_name().into(), areas));
    }

    Ok(DataFrame::new(columns)?)
}

/// Merge defect rows and segment rows into the two report tables.
///
/// # Example
///
/// ```
/// use pavement_report::config::ReportConfig;
/// use pavement_report::report::assemble;
///
/// let tables = assemble(&[], &[], &ReportConfig::default()).unwrap();
/// assert_eq!(tables.detail.frame.width(), 6);
/// assert_eq!(tables.segments.frame.width(), 9);
/// ```
pub fn assemble(
    entries: &[DefectEntry],
    segments: &[SegmentSummary],
    config: &ReportConfig,
) -> Result<ReportTables> {
    let detail = detail_frame(entries)?;
    let per_segment = segment_frame(segments)?;

    Ok(ReportTables {
        detail: ReportTable {
            sheet_name: DETAIL_SHEET.to_string(),
            title: config.detail_title.clone(),
            frame: detail,
        },
        segments: ReportTable {
            sheet_name: SEGMENT_SHEET.to_string(),
            title: format!("{}（每{}米）", config.segment_title, config.segment_length_m()),
            frame: per_segment,
        },
    })
}

/// Check a frame's header against the expected column layout.
///
/// Columns are written to the sheet in frame order, so both the names and
/// their order must match. An absent name is reported as
/// [`ReportError::MissingColumn`]; anything else out of place as
/// [`ReportError::InvalidDataFrame`].
pub fn validate_columns(df: &DataFrame, expected: &[&str]) -> Result<()> {
    let names = df.get_column_names();

    if let Some(missing) = expected
        .iter()
        .find(|col| !names.iter().any(|name| name.as_str() == **col))
    {
        return Err(ReportError::MissingColumn(missing.to_string()));
    }

    let in_order = names.len() == expected.len()
        && names.iter().zip(expected).all(|(name, col)| name.as_str() == *col);
    if !in_order {
        let found: Vec<&str> = names.iter().map(|name| name.as_str()).collect();
        return Err(ReportError::InvalidDataFrame(format!(
            "columns {:?} do not match the layout {:?}",
            found, expected
        )));
    }

    Ok(())
}
