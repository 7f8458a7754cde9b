// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bucket_quadtree::{QuadIndex, QuadIndexConfig};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn gen_random_points(count: usize, w: f64, h: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * w, rng.next_f64() * h))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

fn linear_nearest(points: &[Point], q: Point) -> Option<Point> {
    points
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(q).total_cmp(&b.distance_squared(q)))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        let bounds = Rect::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("add_known_bounds_n{}", n), |b| {
            b.iter_batched(
                || QuadIndex::with_bounds(bounds),
                |mut idx| {
                    idx.add_all(points.iter().copied()).unwrap();
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("add_expanding_n{}", n), |b| {
            b.iter_batched(
                QuadIndex::<Point>::new,
                |mut idx| {
                    idx.add_all(points.iter().copied()).unwrap();
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("from_objects_n{}", n), |b| {
            b.iter(|| {
                let idx = QuadIndex::from_objects(points.iter().copied()).unwrap();
                black_box(idx.len());
            })
        });
    }
    for &bucket_size in &[1usize, 3, 8, 32] {
        let points = gen_random_points(4096, 2000.0, 2000.0);
        let config = QuadIndexConfig {
            bucket_size,
            ..Default::default()
        };
        group.bench_function(format!("add_random_bucket{}", bucket_size), |b| {
            b.iter_batched(
                || QuadIndex::with_config(Rect::new(0.0, 0.0, 2000.0, 2000.0), config),
                |mut idx| {
                    idx.add_all(points.iter().copied()).unwrap();
                    black_box(idx.depth());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let sets = [
        ("random", gen_random_points(4096, 2000.0, 2000.0)),
        ("clustered", gen_clustered_points(16, 256, 60.0)),
    ];
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let queries: Vec<Point> = (0..256)
        .map(|_| Point::new(rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();

    for (name, points) in &sets {
        let idx = QuadIndex::from_objects(points.iter().copied()).unwrap();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("find_nearest_{}", name), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(idx.find_nearest(*q));
                }
            })
        });
        group.bench_function(format!("linear_nearest_{}", name), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(linear_nearest(points, *q));
                }
            })
        });
        group.bench_function(format!("find_exact_{}", name), |b| {
            b.iter(|| {
                for p in points.iter().take(256) {
                    black_box(idx.find(*p));
                }
            })
        });
    }
    group.finish();
}

fn bench_rebalance(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebalance");
    for &count in &[1024usize, 4096] {
        let points = gen_random_points(count, 2000.0, 2000.0);
        let mut idx = QuadIndex::with_bounds(Rect::new(0.0, 0.0, 2000.0, 2000.0));
        idx.add_all(points.iter().copied()).unwrap();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("set_bounds_widen_n{}", count), |b| {
            b.iter_batched(
                || idx.clone(),
                |mut idx| {
                    let evicted = idx.set_bounds(Rect::new(-500.0, -500.0, 2500.0, 2500.0));
                    black_box(evicted.unwrap().len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("remove_readd_n{}", count), |b| {
            b.iter_batched(
                || idx.clone(),
                |mut idx| {
                    for p in points.iter().take(128) {
                        let h = idx.remove(*p).unwrap();
                        idx.add(h).unwrap();
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_rebalance);
criterion_main!(benches);
