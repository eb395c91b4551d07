//! Spreadsheet output for assembled report tables.

use crate::error::{ReportError, Result};
use crate::report::{ReportTable, ReportTables};
use polars::prelude::*;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

const TITLE_ROW: RowNum = 0;
const HEADER_ROW: RowNum = 1;
const FIRST_DATA_ROW: RowNum = 2;

/// Write both report tables to an `.xlsx` workbook at `path`.
///
/// Each table gets its own sheet: a merged title row spanning the header,
/// the column headers, then one row per DataFrame row.
///
/// # Errors
///
/// Returns [`ReportError::MissingColumn`] or [`ReportError::InvalidDataFrame`]
/// when a table does not match the report layout or holds an unsupported
/// column type, and [`ReportError::Xlsx`] if the workbook
/// cannot be built or saved.
pub fn write_workbook(tables: &ReportTables, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(tables)?;
    workbook.save(path)?;
    Ok(())
}

/// Build the workbook in memory without saving it.
pub fn build_workbook(tables: &ReportTables) -> Result<Workbook> {
    tables.validate()?;

    let mut workbook = Workbook::new();
    let title_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for table in tables.tables() {
        let worksheet = workbook.add_worksheet();
        write_table(worksheet, table, &title_format)?;
    }

    Ok(workbook)
}

fn write_table(worksheet: &mut Worksheet, table: &ReportTable, title_format: &Format) -> Result<()> {
    let frame = &table.frame;
    if frame.width() == 0 {
        return Err(ReportError::InvalidDataFrame(format!(
            "table {:?} has no columns",
            table.sheet_name
        )));
    }

    worksheet.set_name(&table.sheet_name)?;

    let last_col = to_col(frame.width() - 1)?;
    if last_col == 0 {
        worksheet.write_string_with_format(TITLE_ROW, 0, &table.title, title_format)?;
    } else {
        worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &table.title, title_format)?;
    }

    for (i, column) in frame.get_columns().iter().enumerate() {
        let col = to_col(i)?;
        worksheet.write_string(HEADER_ROW, col, column.name().as_str())?;
        write_column(worksheet, col, column.as_materialized_series())?;
    }

    debug!(
        sheet = %table.sheet_name,
        rows = frame.height(),
        "sheet written"
    );
    Ok(())
}

fn write_column(worksheet: &mut Worksheet, col: ColNum, series: &Series) -> Result<()> {
    match series.dtype() {
        DataType::String => {
            for (i, value) in series.str()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_string(to_row(i)?, col, value)?;
                }
            }
        }
        DataType::Float64 => {
            for (i, value) in series.f64()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(to_row(i)?, col, value)?;
                }
            }
        }
        DataType::UInt32 => {
            for (i, value) in series.u32()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(to_row(i)?, col, f64::from(value))?;
                }
            }
        }
        other => {
            return Err(ReportError::InvalidDataFrame(format!(
                "column {:?} has unsupported type {:?}",
                series.name().as_str(),
                other
            )));
        }
    }
    Ok(())
}

fn to_row(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .ok()
        .and_then(|row| row.checked_add(FIRST_DATA_ROW))
        .ok_or_else(|| ReportError::InvalidDataFrame(format!("row {} is out of range", index)))
}

fn to_col(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ReportError::InvalidDataFrame(format!("column {} is out of range", index)))
}
