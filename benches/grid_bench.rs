//! Benchmarks for the pure heatmap core

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use stockheat::calendar::{build_month_grid, year_grids};
use stockheat::tui::widgets::heatmap::cell_edge;
use stockheat::types::ChangeBucket;

fn bench_month_grid(c: &mut Criterion) {
    c.bench_function("build_month_grid", |b| {
        b.iter(|| build_month_grid(black_box(2024), black_box(2)))
    });

    c.bench_function("year_grids", |b| b.iter(|| year_grids(black_box(2024))));
}

fn bench_classifier(c: &mut Criterion) {
    let samples: Vec<Option<f64>> = (-400..400)
        .map(|i| Some(f64::from(i) / 100.0))
        .chain(std::iter::repeat(None).take(50))
        .collect();

    c.bench_function("classify_800_days", |b| {
        b.iter(|| {
            for &pct in &samples {
                black_box(ChangeBucket::from_pct(black_box(pct)));
            }
        })
    });
}

fn bench_sizer(c: &mut Criterion) {
    c.bench_function("cell_edge", |b| {
        b.iter(|| cell_edge(black_box(1440.0)))
    });
}

criterion_group!(benches, bench_month_grid, bench_classifier, bench_sizer);
criterion_main!(benches);
