//! Benchmarks for the pure advisory engine functions

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use npk_advisor::classifier::Features;
use npk_advisor::data::Dataset;
use npk_advisor::training::fit_bundle;
use npk_advisor::{
    compute_gaps, plan_reduction, predict_crop, score_soil_health, suggest_rotation, Strategy,
};

fn generate_readings(count: usize) -> Vec<Features> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            [5.0 + (x * 7.3) % 180.0, 5.0 + (x * 3.1) % 120.0, 5.0 + (x * 5.7) % 200.0]
        })
        .collect()
}

fn bench_soil_health(c: &mut Criterion) {
    let mut group = c.benchmark_group("soil_health");
    let readings = generate_readings(1000);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("score_1000_readings", |b| {
        b.iter(|| {
            for r in &readings {
                black_box(score_soil_health(r[0], r[1], r[2]));
            }
        })
    });

    group.finish();
}

fn bench_gaps_and_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaps");
    let readings = generate_readings(1000);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("gaps_and_plan_1000_readings", |b| {
        b.iter(|| {
            for r in &readings {
                if let Ok(gaps) = compute_gaps(r[0], r[1], r[2], "Tomato", Strategy::Midpoint) {
                    black_box(plan_reduction(r[0], r[1], r[2], "Tomato", &gaps.targets));
                }
            }
        })
    });

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    c.bench_function("suggest_rotation_rice", |b| {
        b.iter(|| black_box(suggest_rotation(black_box("Rice"))))
    });
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    // Setup - three separated crop clusters
    let mut train = Dataset::default();
    for (i, r) in generate_readings(300).into_iter().enumerate() {
        let crop = ["rice", "maize", "cotton"][i % 3];
        let offset = (i % 3) as f64 * 60.0;
        train.rows.push([r[0] + offset, r[1] + offset, r[2] + offset]);
        train.labels.push(crop.to_string());
    }
    let Ok(bundle) = fit_bundle(&train, 1e-9) else {
        return;
    };

    let readings = generate_readings(1000);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("predict_1000_readings", |b| {
        b.iter(|| {
            for r in &readings {
                black_box(predict_crop(r[0], r[1], r[2], &bundle).ok());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_soil_health,
    bench_gaps_and_reduction,
    bench_rotation,
    bench_prediction
);
criterion_main!(benches);
