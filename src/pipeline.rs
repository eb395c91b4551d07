//! Main orchestrator turning label files into report rows.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::{find_label_files, load_label_file};
use crate::measure::{measure_shapes, resolve_scale};
use crate::position::PositionIndex;
use crate::report::assemble;
use crate::stats::ReportStats;
use crate::types::{AnnotationRecord, DefectEntry, Measurement, SegmentSummary};
use crate::segment::SegmentAggregator;
use crate::writer::write_workbook;
use std::path::Path;
use tracing::{debug, info, warn};

/// Rows produced by one run, before they are laid out as tables.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    /// Defect rows in position order, then file order, then shape order.
    pub entries: Vec<DefectEntry>,
    /// Segment rows in emission order.
    pub segments: Vec<SegmentSummary>,
    pub stats: ReportStats,
}

/// Measure and aggregate annotation records against a position index.
///
/// Records whose image is not in the index are dropped and counted. The
/// remaining records are visited in index order, so the segment boundaries
/// depend only on the order of the index lines.
///
/// # Errors
///
/// Any unknown defect class, unusable image dimensions, invalid shape or
/// invalid pile aborts the whole run.
pub fn build_report(
    index: &PositionIndex,
    records: Vec<AnnotationRecord>,
    config: &ReportConfig,
) -> Result<ReportData> {
    config.validate()?;

    let mut stats = ReportStats::new();
    stats.positions = index.len();
    stats.malformed_index_lines = index.malformed_lines();

    let lookup = index.image_lookup();
    let mut by_position: Vec<Vec<AnnotationRecord>> = vec![Vec::new(); index.len()];

    for record in records {
        stats.add_label_file();
        match lookup.get(record.image_filename.as_str()) {
            Some(&position) => {
                stats.match_record();
                by_position[position].push(record);
            }
            None => {
                stats.drop_unmapped();
                warn!(image = %record.image_filename, "no position for image, dropping its annotations");
            }
        }
    }

    let mut aggregator = SegmentAggregator::new(config.segment_size, config.pile_step_m)?;
    let mut entries = Vec::new();

    for (entry, records) in index.iter().zip(&by_position) {
        if !records.is_empty() {
            stats.annotated_positions += 1;
        }

        let mut measurements: Vec<Measurement> = Vec::new();
        for record in records {
            let scale = resolve_scale(
                record.image_width,
                record.image_height,
                config.real_height_m,
                config.real_width_m,
            )?;
            let measured = measure_shapes(&record.shapes, &scale)?;
            debug!(
                pile = %entry.pile,
                image = %record.image_filename,
                shapes = measured.len(),
                "measured image"
            );
            measurements.extend(measured);
        }

        stats.add_shapes(measurements.len());
        entries.extend(measurements.iter().map(|m| m.at(entry.pile.clone())));

        if let Some(summary) = aggregator.observe(&entry.pile, &measurements)? {
            debug!(
                start = %summary.start_pile,
                end = %summary.end_pile,
                area = summary.area_by_class.total(),
                "segment closed"
            );
        }
    }

    let segments = aggregator.finish();
    stats.segments = segments.len();

    Ok(ReportData {
        entries,
        segments,
        stats,
    })
}

/// Read an index and a directory of label files, then measure and aggregate.
///
/// # Errors
///
/// Fails on an unreadable index, label directory or label file, and on
/// every error [`build_report`] reports.
pub fn collect<P: AsRef<Path>, Q: AsRef<Path>>(
    label_dir: P,
    index_path: Q,
    config: &ReportConfig,
) -> Result<ReportData> {
    let index = PositionIndex::load(index_path.as_ref(), &config.pile_key)?;
    info!(
        positions = index.len(),
        malformed = index.malformed_lines(),
        "loaded position index"
    );

    let files = find_label_files(label_dir.as_ref())?;
    info!(files = files.len(), dir = %label_dir.as_ref().display(), "found label files");

    let records = files
        .iter()
        .map(load_label_file)
        .collect::<Result<Vec<_>>>()?;

    build_report(&index, records, config)
}

/// Produce the full spreadsheet report.
///
/// The workbook is written only after every table has been assembled, so a
/// failed run leaves no output file behind.
///
/// # Example
///
/// ```no_run
/// use pavement_report::config::ReportConfig;
/// use pavement_report::pipeline::generate_report;
///
/// let config = ReportConfig { real_height_m: 2.0, real_width_m: 5.0, ..Default::default() };
/// let stats = generate_report("labels", "fileindex.txt", "report.xlsx", &config).unwrap();
/// println!("{}", stats.summary_string());
/// ```
pub fn generate_report<P, Q, R>(
    label_dir: P,
    index_path: Q,
    output_path: R,
    config: &ReportConfig,
) -> Result<ReportStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let data = collect(label_dir, index_path, config)?;
    let tables = assemble(&data.entries, &data.segments, config)?;
    write_workbook(&tables, output_path.as_ref())?;

    info!(
        output = %output_path.as_ref().display(),
        defects = data.entries.len(),
        segments = data.segments.len(),
        "report written"
    );
    data.stats.log_summary();

    Ok(data.stats)
}
