use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pavement_report::config::ReportConfig;
use pavement_report::measure::{measure_shape, resolve_scale, DefectClass};
use pavement_report::pipeline::build_report;
use pavement_report::position::{PileKeyFormat, PositionIndex};
use pavement_report::report::assemble;
use pavement_report::types::{AnnotationRecord, RawShape};

fn survey(positions: usize, shapes_per_image: usize) -> (PositionIndex, Vec<AnnotationRecord>) {
    let text: String = (0..positions)
        .map(|i| format!("{}+{:03}.000m->img{:05}.jpg->x\n", i / 500, (i * 2) % 1000, i))
        .collect();
    let index = PositionIndex::parse(&text, &PileKeyFormat::default());

    let records = (0..positions)
        .map(|i| AnnotationRecord {
            image_filename: format!("img{:05}.jpg", i),
            image_width: 1920.0,
            image_height: 1080.0,
            shapes: (0..shapes_per_image)
                .map(|j| {
                    let class = DefectClass::ALL[(i + j) % DefectClass::COUNT];
                    let offset = (j * 37 % 900) as f64;
                    RawShape::new(class.id(), [offset, offset], [offset + 120.0, offset + 80.0])
                })
                .collect(),
        })
        .collect();

    (index, records)
}

fn bench_measure_shape(c: &mut Criterion) {
    let scale = resolve_scale(1920.0, 1080.0, 2.0, 5.0).unwrap();
    let shape = RawShape::new("hengxiangliefeng", [10.0, 10.0], [600.0, 40.0]);

    c.bench_function("measure_shape", |b| {
        b.iter(|| measure_shape(black_box(&shape), black_box(&scale)))
    });
}

fn bench_index_parse(c: &mut Criterion) {
    let text: String = (0..5000)
        .map(|i| format!("{}+{:03}.000m->img{:05}.jpg->x\n", i / 500, (i * 2) % 1000, i))
        .collect();

    c.bench_function("position_index_parse_5000", |b| {
        b.iter(|| PositionIndex::parse(black_box(&text), &PileKeyFormat::default()))
    });
}

fn bench_build_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_report");
    let config = ReportConfig {
        real_height_m: 2.0,
        real_width_m: 5.0,
        ..Default::default()
    };

    for positions in [100, 1000, 5000].iter() {
        let (index, records) = survey(*positions, 4);

        group.bench_with_input(BenchmarkId::from_parameter(positions), positions, |b, _| {
            b.iter(|| build_report(black_box(&index), records.clone(), &config).unwrap())
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let config = ReportConfig {
        real_height_m: 2.0,
        real_width_m: 5.0,
        ..Default::default()
    };
    let (index, records) = survey(1000, 4);
    let data = build_report(&index, records, &config).unwrap();

    c.bench_function("assemble_1000_positions", |b| {
        b.iter(|| assemble(black_box(&data.entries), black_box(&data.segments), &config).unwrap())
    });
}

criterion_group!(
    benches,
    bench_measure_shape,
    bench_index_parse,
    bench_build_report,
    bench_assemble
);
criterion_main!(benches);
