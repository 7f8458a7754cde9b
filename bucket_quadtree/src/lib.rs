// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket Quadtree: a bucketed point quadtree with self-expanding bounds.
//!
//! Bucket Quadtree indexes a dynamic set of 2D-positioned objects.
//!
//! - Add and remove objects; exact lookup by position.
//! - Fast, approximate nearest-object lookup.
//! - Points outside the declared bounds grow the bounds instead of being rejected
//!   (configurable), and the tree rebuilds itself against the new bounds.
//!
//! Objects are stored as handles implementing [`Positioned`]: references, `Rc`s, small ids
//! that carry a position, or plain [`kurbo::Point`]s. The index never owns what a handle
//! points at.
//!
//! # Example
//!
//! ```rust
//! use bucket_quadtree::{Positioned, QuadIndex};
//! use kurbo::{Point, Rect};
//!
//! struct SpawnPoint {
//!     name: &'static str,
//!     at: Point,
//! }
//!
//! impl Positioned for SpawnPoint {
//!     fn position(&self) -> Point {
//!         self.at
//!     }
//! }
//!
//! let points = [
//!     SpawnPoint { name: "gate", at: Point::new(10.0, 10.0) },
//!     SpawnPoint { name: "tower", at: Point::new(80.0, 20.0) },
//!     SpawnPoint { name: "well", at: Point::new(30.0, 70.0) },
//! ];
//!
//! let mut idx = QuadIndex::with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
//! idx.add_all(points.iter()).unwrap();
//!
//! // Exact lookup.
//! assert_eq!(idx.find(Point::new(80.0, 20.0)).unwrap().name, "tower");
//!
//! // Nearest lookup.
//! assert_eq!(idx.find_nearest(Point::new(12.0, 5.0)).unwrap().name, "gate");
//!
//! // Out-of-bounds points grow the index.
//! let cave = SpawnPoint { name: "cave", at: Point::new(150.0, -20.0) };
//! idx.add(&cave).unwrap();
//! assert_eq!(idx.bounds(), Rect::new(0.0, -20.0, 150.0, 100.0));
//! assert_eq!(idx.len(), 4);
//! ```
//!
//! ## Structure
//!
//! Every node covers a rectangle and holds up to `bucket_size` objects (3 by default) in
//! insertion order. Only once a node's bucket is full does insertion descend into the child
//! for the object's [`Quadrant`], creating it on first use. Children split their parent at
//! its center and tile it exactly.
//!
//! Classification is inclusive on the outer edges and on the center lines: a point on a
//! center line belongs to the upper/left neighbor.
//!
//! ## Nearest lookups are approximate
//!
//! [`QuadIndex::find_nearest`] walks a single path from the root, choosing at each node the
//! child on the query's side of the center, and keeps the closest object seen in the
//! buckets along that path. It never backtracks, so it can miss a closer object just across
//! a center line. Use [`QuadIndex::iter`] for an exhaustive search when exactness matters.
//!
//! ## Bounds changes
//!
//! [`QuadIndex::set_bounds`] (and any expanding [`QuadIndex::add`]) recomputes every node
//! rectangle, drains all objects and reinserts them from the root. This is linear in the
//! number of stored objects, so give the index sensible initial bounds when they are known.
//!
//! ### Float semantics
//!
//! Positions and bounds must be finite. [`QuadIndex::add`] and [`QuadIndex::set_bounds`]
//! report NaN or infinite input with an [`IndexError`] rather than misclassifying it.
//!
//! ## Resources
//!
//! Heavily clustered points can make the tree deep. Lookups and insertion walk iteratively,
//! but rebalancing and dropping recurse once per level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod index;
mod node;
pub mod types;

pub use config::QuadIndexConfig;
pub use error::IndexError;
pub use index::{Iter, QuadIndex};
pub use types::{Positioned, Quadrant};
