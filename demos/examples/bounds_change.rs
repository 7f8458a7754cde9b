// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds changes.
//!
//! Fill an index, list its contents, widen the bounds, and list again. The listing order
//! changes because the tree is rebuilt against the new bounds; the contents do not.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p bucket_quadtree_demos --example bounds_change`

use bucket_quadtree::QuadIndex;
use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = QuadIndex::with_bounds(Rect::new(-100.0, -100.0, 100.0, 100.0));
    let points = [
        Point::new(-50.0, -50.0),
        Point::new(75.0, -20.0),
        Point::new(10.0, 90.0),
        Point::new(-80.0, 60.0),
        Point::new(30.0, 30.0),
        Point::new(99.0, 99.0),
        Point::new(250.0, 40.0),
    ];
    for p in points {
        if let Err(err) = tree.add(p) {
            println!("could not add {p:?}: {err}");
        }
    }

    println!("bounds {:?}, depth {}", tree.bounds(), tree.depth());
    for p in &tree {
        println!("  {p:?}");
    }

    let evicted = tree
        .set_bounds(Rect::new(-100.0, -100.0, 500.0, 500.0))
        .expect("finite bounds");
    assert!(evicted.is_empty(), "widening never evicts");

    println!(
        "after bounds change: {:?}, depth {}",
        tree.bounds(),
        tree.depth()
    );
    for p in &tree {
        println!("  {p:?}");
    }
    assert_eq!(tree.len(), points.len());
}
