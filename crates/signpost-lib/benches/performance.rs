//! Performance benchmarks for signpost-lib
//!
//! Run with: cargo bench --package signpost-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Point;
use signpost_lib::{
    BoundaryRule, CancelToken, Config, Extent, SignpostEngine, build_regions, count_by_sector,
    count_by_sector_with,
};
use std::hint::black_box;

/// Generate points scattered over a city-sized area
fn generate_points(num_points: usize, base_lat: f64, base_lon: f64) -> Vec<Point<f64>> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + (t * 977.0).sin() * 0.5;
            let lon = base_lon + (t * 1531.0).cos() * 0.8;
            Point::new(lon, lat)
        })
        .collect()
}

/// Viewport around the given center
fn create_viewport(center_lat: f64, center_lon: f64, half_size: f64) -> Extent {
    Extent::new(
        center_lat + half_size,
        center_lon + half_size,
        center_lat - half_size,
        center_lon - half_size,
    )
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_build_regions(c: &mut Criterion) {
    let dataset = Extent::new(53.0, 1.0, 50.0, -2.0);
    let viewport = create_viewport(51.5, -0.1, 0.05);

    c.bench_function("build_regions", |b| {
        b.iter(|| build_regions(black_box(dataset), black_box(viewport)))
    });
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");
    let dataset = Extent::new(53.0, 1.0, 50.0, -2.0);
    let regions = build_regions(dataset, create_viewport(51.5, -0.1, 0.05));

    for size in [10_000, 100_000, 1_000_000] {
        let points = generate_points(size, 51.5, -0.1);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &points, |b, points| {
            b.iter(|| count_by_sector(&regions, black_box(points), BoundaryRule::Strict))
        });

        let parallel = Config {
            parallel_threshold: 0,
            ..Config::default()
        };
        let cancel = CancelToken::never();
        group.bench_with_input(BenchmarkId::new("parallel", size), &points, |b, points| {
            b.iter(|| count_by_sector_with(&regions, black_box(points), &parallel, &cancel))
        });
    }

    group.finish();
}

fn bench_pan(c: &mut Criterion) {
    let points = generate_points(100_000, 51.5, -0.1);
    let mut engine = SignpostEngine::new(points, Config::default()).unwrap();
    let mut step = 0usize;

    c.bench_function("pan_recompute_100k", |b| {
        b.iter(|| {
            step = (step + 1) % 100;
            let offset = step as f64 * 0.01;
            engine.recompute(create_viewport(51.0 + offset, -0.6 + offset, 0.1))
        })
    });
}

criterion_group!(benches, bench_build_regions, bench_count, bench_pan);
criterion_main!(benches);
