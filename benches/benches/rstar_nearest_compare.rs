// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use bucket_quadtree::QuadIndex;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

use rstar::RTree;

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn to_rstar_points(v: &[Point]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let queries: Vec<Point> = (0..128)
            .map(|i| Point::new(i as f64 * 7.3 + 0.4, i as f64 * 4.1 + 0.7))
            .collect();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_nearest_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let idx = QuadIndex::from_objects(points).unwrap();
                    for q in &queries {
                        black_box(idx.find_nearest(*q));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_nearest_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    for q in &queries {
                        black_box(tree.nearest_neighbor(&[q.x, q.y]));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare);
criterion_main!(benches);
