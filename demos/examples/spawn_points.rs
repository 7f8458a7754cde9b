// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spawn point selection.
//!
//! A spawner keeps its spawn points in a quad index, then picks either the point nearest
//! to a requested location or a random one. Placed points are added in bulk; points found
//! later are added one at a time and may grow the index bounds.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p bucket_quadtree_demos --example spawn_points`

use bucket_quadtree::{Positioned, QuadIndex};
use kurbo::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SpawnPoint {
    name: &'static str,
    at: Point,
}

impl SpawnPoint {
    const fn new(name: &'static str, x: f64, y: f64) -> Self {
        Self {
            name,
            at: Point::new(x, y),
        }
    }
}

impl Positioned for SpawnPoint {
    fn position(&self) -> Point {
        self.at
    }
}

struct Spawner<'a> {
    points: QuadIndex<&'a SpawnPoint>,
    rng: StdRng,
}

impl<'a> Spawner<'a> {
    fn new(placed: &'a [SpawnPoint]) -> Self {
        let mut points = QuadIndex::new();
        if let Err(err) = points.add_all(placed) {
            warn!(%err, "some placed spawn points were rejected");
        }
        Self {
            points,
            rng: StdRng::seed_from_u64(0x5EED_CAFE_F00D_0001),
        }
    }

    fn discover(&mut self, point: &'a SpawnPoint) {
        if let Err(err) = self.points.add(point) {
            warn!(%err, name = point.name, "could not register discovered spawn point");
        }
    }

    fn nearest_to(&self, location: Point) -> Option<&'a SpawnPoint> {
        let found = self.points.find_nearest(location).copied();
        if found.is_none() {
            error!("no spawn point in index");
        }
        found
    }

    fn random(&mut self) -> Option<&'a SpawnPoint> {
        let all = self.points.all_objects();
        let picked = all.choose(&mut self.rng).map(|p| **p);
        if picked.is_none() {
            error!("no spawn point in index");
        }
        picked
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let placed = [
        SpawnPoint::new("north gate", 0.0, -400.0),
        SpawnPoint::new("south gate", 0.0, 400.0),
        SpawnPoint::new("market", 40.0, 25.0),
        SpawnPoint::new("barracks", -220.0, 130.0),
        SpawnPoint::new("harbor", 310.0, 210.0),
    ];
    let discovered = [
        SpawnPoint::new("cave", -900.0, -650.0),
        SpawnPoint::new("ruins", 720.0, -80.0),
    ];

    let mut spawner = Spawner::new(&placed);
    for point in &discovered {
        spawner.discover(point);
    }
    info!(
        count = spawner.points.len(),
        bounds = ?spawner.points.bounds(),
        "spawn points ready"
    );

    let requests = [
        Point::new(30.0, 30.0),
        Point::new(-800.0, -500.0),
        Point::new(600.0, 0.0),
    ];
    for location in requests {
        if let Some(point) = spawner.nearest_to(location) {
            println!("near {location:?}: {} at {:?}", point.name, point.at);
        }
    }

    for _ in 0..3 {
        if let Some(point) = spawner.random() {
            println!("random spawn: {} at {:?}", point.name, point.at);
        }
    }

    println!("all spawn points:");
    for point in &spawner.points {
        println!("  {} at {:?}", point.name, point.at);
    }

    let empty = Spawner::new(&[]);
    assert!(
        empty.nearest_to(Point::ZERO).is_none(),
        "an empty spawner has nothing to offer"
    );
}
