use criterion::{black_box, criterion_group, criterion_main, Criterion};
use murmuration_core::index::SpatialIndex;
use murmuration_data::{Boid, Vec2};

fn flock(n: usize) -> Vec<Boid> {
    (0..n)
        .map(|i| {
            let x = (i % 100) as f64 * 12.8;
            let y = (i / 100) as f64 * 14.4;
            Boid::new(i, Vec2::new(x, y))
        })
        .collect()
}

fn bench_index_rebuild(c: &mut Criterion) {
    let boids = flock(1000);
    c.bench_function("index_rebuild_1000", |b| {
        let mut index = SpatialIndex::new(50.0);
        b.iter(|| {
            index.rebuild(&boids);
            black_box(index.occupied_cells())
        })
    });
}

fn bench_iter_neighbours(c: &mut Criterion) {
    let boids = flock(1000);
    let mut index = SpatialIndex::new(50.0);
    index.rebuild(&boids);

    c.bench_function("index_iter_neighbours", |b| {
        b.iter(|| {
            let mut count = 0usize;
            index.iter_neighbours(&boids[500], |_| count += 1);
            black_box(count)
        })
    });
}

fn bench_iter_bounds(c: &mut Criterion) {
    let boids = flock(1000);
    let mut index = SpatialIndex::new(50.0);
    index.rebuild(&boids);

    c.bench_function("index_iter_bounds_viewport", |b| {
        b.iter(|| {
            let mut count = 0usize;
            index.iter_bounds(Vec2::ZERO, Vec2::new(640.0, 360.0), |_| count += 1);
            black_box(count)
        })
    });
}

criterion_group!(
    benches,
    bench_index_rebuild,
    bench_iter_neighbours,
    bench_iter_bounds
);
criterion_main!(benches);
