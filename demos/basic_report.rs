//! Basic report example demonstrating the core pipeline.

use pavement_report::{
    build_report, load_label_from_str, measure_shape, resolve_scale,
    report::assemble, PileKeyFormat, PositionIndex, RawShape, ReportConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pavement Report Example ===\n");

    // Example 1: one shape on a 1920x1080 frame covering 2 m x 5 m
    println!("1. Measuring a single shape");
    let scale = resolve_scale(1920.0, 1080.0, 2.0, 5.0)?;
    let shape = RawShape::new("kuaizhuangliefeng", [0.0, 0.0], [192.0, 108.0]);
    let m = measure_shape(&shape, &scale)?;
    println!(
        "   {}: length {:.4} m, width {:.4} m, area {:.4} m²",
        m.class, m.length_m, m.width_m, m.area_m2
    );
    println!();

    // Example 2: a short survey
    println!("2. Building a report");
    let index_text = "\
12+300.000m->img000.jpg->f0
12+302.000m->img001.jpg->f1
12+304.000m->img002.jpg->f2
12+306.000m->img003.jpg->f3
12+308.000m->img004.jpg->f4
12+310.000m->img005.jpg->f5
12+312.000m->img006.jpg->f6
";
    let index = PositionIndex::parse(index_text, &PileKeyFormat::default());
    println!("   Loaded {} positions", index.len());

    let labels = [
        r#"{"imagePath": "img001.jpg", "imageWidth": 1920, "imageHeight": 1080,
            "shapes": [{"label": "kengcao", "points": [[100, 100], [640, 580]]}]}"#,
        r#"{"imagePath": "..\\images\\img005.jpg", "imageWidth": 1920, "imageHeight": 1080,
            "shapes": [{"label": "hengxiangliefeng", "points": [[0, 500], [1080, 540]]},
                       {"label": "kuaizhuangxiubu", "points": [[200, 200], [740, 584]]}]}"#,
        r#"{"imagePath": "img999.jpg", "imageWidth": 1920, "imageHeight": 1080,
            "shapes": [{"label": "junlie", "points": [[0, 0], [10, 10]]}]}"#,
    ];
    let records = labels
        .iter()
        .map(|json| load_label_from_str(json))
        .collect::<Result<Vec<_>, _>>()?;

    let config = ReportConfig {
        real_height_m: 2.0,
        real_width_m: 5.0,
        ..Default::default()
    };
    let data = build_report(&index, records, &config)?;
    println!("   {}", data.stats.summary_string());
    println!();

    println!("3. Defect detail");
    for (i, entry) in data.entries.iter().enumerate() {
        println!(
            "   {:>2}  {}  {:<6}  {:.3} x {:.3} m  {:.4} m²",
            i + 1,
            entry.pile,
            entry.defect_name(),
            entry.length_m,
            entry.width_m,
            entry.area_m2
        );
    }
    println!();

    println!("4. Segment statistics");
    for segment in &data.segments {
        println!(
            "   {} -> {}: {:.4} m² total",
            segment.start_pile,
            segment.end_pile,
            segment.area_by_class.total()
        );
        for (class, area) in segment.area_by_class.iter().filter(|(_, a)| *a > 0.0) {
            println!("      {}: {:.4} m²", class, area);
        }
    }
    println!();

    let tables = assemble(&data.entries, &data.segments, &config)?;
    println!("5. Tables");
    println!("{}", tables.detail.frame);
    println!("{}", tables.segments.frame);

    Ok(())
}
