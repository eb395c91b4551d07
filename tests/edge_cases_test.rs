//! Edge case tests for position matching and segment bucketing.

use pavement_report::config::ReportConfig;
use pavement_report::measure::DefectClass;
use pavement_report::pipeline::build_report;
use pavement_report::position::{PileKeyFormat, PositionIndex};
use pavement_report::types::{AnnotationRecord, RawShape};

fn record(image: &str, shapes: Vec<RawShape>) -> AnnotationRecord {
    AnnotationRecord {
        image_filename: image.to_string(),
        image_width: 10.0,
        image_height: 10.0,
        shapes,
    }
}

fn unit_config() -> ReportConfig {
    ReportConfig {
        real_height_m: 10.0,
        real_width_m: 10.0,
        ..Default::default()
    }
}

fn pothole(w: f64, h: f64) -> RawShape {
    RawShape::new("kengcao", [0.0, 0.0], [w, h])
}

#[test]
fn test_empty_index_produces_nothing() {
    let index = PositionIndex::parse("", &PileKeyFormat::default());
    let data = build_report(&index, vec![record("a.jpg", vec![pothole(1.0, 1.0)])], &unit_config())
        .unwrap();

    assert!(data.entries.is_empty());
    assert!(data.segments.is_empty());
    assert_eq!(data.stats.dropped_unmapped, 1);
}

#[test]
fn test_unmapped_image_produces_no_rows_and_no_error() {
    let index = PositionIndex::parse("0+002.0->a.jpg->x\n", &PileKeyFormat::default());
    let data = build_report(
        &index,
        vec![record("missing.jpg", vec![pothole(1.0, 1.0)])],
        &unit_config(),
    )
    .unwrap();

    assert!(data.entries.is_empty());
    assert_eq!(data.segments.len(), 1);
    assert_eq!(data.segments[0].area_by_class.total(), 0.0);
}

#[test]
fn test_duplicate_image_names_match_first_position() {
    let index = PositionIndex::parse(
        "0+002.0->same.jpg->x\n0+004.0->same.jpg->x\n",
        &PileKeyFormat::default(),
    );
    let data = build_report(&index, vec![record("same.jpg", vec![pothole(1.0, 1.0)])], &unit_config())
        .unwrap();

    assert_eq!(data.entries.len(), 1);
    assert_eq!(data.entries[0].pile.as_str(), "0002");
}

#[test]
fn test_duplicate_pile_uses_later_image() {
    let index = PositionIndex::parse(
        "0+002.0->old.jpg->x\n0+004.0->b.jpg->x\n0+002.5->new.jpg->x\n",
        &PileKeyFormat::default(),
    );
    assert_eq!(index.len(), 2);

    let records = vec![
        record("old.jpg", vec![pothole(1.0, 1.0)]),
        record("new.jpg", vec![pothole(2.0, 2.0)]),
    ];
    let data = build_report(&index, records, &unit_config()).unwrap();

    assert_eq!(data.stats.dropped_unmapped, 1);
    assert_eq!(data.entries.len(), 1);
    assert_eq!(data.entries[0].pile.as_str(), "0002");
    assert_eq!(data.entries[0].area_m2, 4.0);
}

#[test]
fn test_several_label_files_for_one_image_keep_file_order() {
    let index = PositionIndex::parse("0+002.0->a.jpg->x\n", &PileKeyFormat::default());
    let records = vec![
        record("a.jpg", vec![pothole(1.0, 1.0)]),
        record("a.jpg", vec![RawShape::new("junlie", [0.0, 0.0], [2.0, 1.0])]),
    ];
    let data = build_report(&index, records, &unit_config()).unwrap();

    assert_eq!(data.entries.len(), 2);
    assert_eq!(data.entries[0].class, DefectClass::Pothole);
    assert_eq!(data.entries[1].class, DefectClass::AlligatorCrack);
    assert_eq!(data.stats.annotated_positions, 1);
}

#[test]
fn test_shapes_keep_input_order_within_an_image() {
    let index = PositionIndex::parse("0+002.0->a.jpg->x\n", &PileKeyFormat::default());
    let shapes = vec![
        RawShape::new("zongxiangliefeng", [0.0, 0.0], [0.0, 5.0]),
        pothole(1.0, 1.0),
        RawShape::new("kuaizhuangliefeng", [0.0, 0.0], [3.0, 3.0]),
    ];
    let data = build_report(&index, vec![record("a.jpg", shapes)], &unit_config()).unwrap();

    let classes: Vec<DefectClass> = data.entries.iter().map(|e| e.class).collect();
    assert_eq!(
        classes,
        vec![DefectClass::LongitudinalCrack, DefectClass::Pothole, DefectClass::BlockCrack]
    );
}

#[test]
fn test_polygon_with_extra_points_uses_first_two() {
    let index = PositionIndex::parse("0+002.0->a.jpg->x\n", &PileKeyFormat::default());
    let shape = RawShape {
        label: "kengcao".to_string(),
        points: vec![[0.0, 0.0], [2.0, 3.0], [9.0, 9.0], [0.0, 9.0]],
    };
    let data = build_report(&index, vec![record("a.jpg", vec![shape])], &unit_config()).unwrap();

    assert_eq!(data.entries[0].length_m, 2.0);
    assert_eq!(data.entries[0].width_m, 3.0);
}

#[test]
fn test_segment_bucketing_ignores_pile_values() {
    // Piles out of numeric order: boundaries still follow line order.
    let text = "0+020.0->a.jpg->x\n0+002.0->b.jpg->x\n0+050.0->c.jpg->x\n";
    let index = PositionIndex::parse(text, &PileKeyFormat::default());
    let config = ReportConfig {
        segment_size: 2,
        ..unit_config()
    };
    let records = vec![record("c.jpg", vec![pothole(1.0, 1.0)])];
    let data = build_report(&index, records, &config).unwrap();

    assert_eq!(data.segments.len(), 2);
    assert_eq!(data.segments[0].start_pile.as_str(), "0018");
    assert_eq!(data.segments[0].end_pile.as_str(), "0002");
    assert_eq!(data.segments[1].start_pile.as_str(), "0048");
    assert_eq!(data.segments[1].end_pile.as_str(), "0050");
    assert_eq!(data.segments[1].area_by_class.get(DefectClass::Pothole), 1.0);
}

#[test]
fn test_custom_pile_step() {
    let index = PositionIndex::parse("1+000.0->a.jpg->x\n", &PileKeyFormat::default());
    let config = ReportConfig {
        pile_step_m: 5,
        ..unit_config()
    };
    let data = build_report(&index, Vec::new(), &config).unwrap();
    assert_eq!(data.segments[0].start_pile.as_str(), "995");
}

#[test]
fn test_degenerate_box_has_zero_area() {
    let index = PositionIndex::parse("0+002.0->a.jpg->x\n", &PileKeyFormat::default());
    let data = build_report(
        &index,
        vec![record("a.jpg", vec![RawShape::new("kuaizhuangliefeng", [4.0, 4.0], [4.0, 4.0])])],
        &unit_config(),
    )
    .unwrap();

    assert_eq!(data.entries[0].area_m2, 0.0);
}
