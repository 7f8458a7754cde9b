// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadIndex` API: construction, insertion with bounds expansion, lookups, and
//! rebalancing.

use alloc::vec::Vec;
use core::fmt::Debug;
use kurbo::{Point, Rect};

use crate::config::QuadIndexConfig;
use crate::error::IndexError;
use crate::node::QuadNode;
use crate::types::{Positioned, Quadrant, bounding_rect};

/// A bucketed point quadtree over handles of type `T`.
///
/// Each node stores up to [`bucket_size`](Self::bucket_size) objects directly and only then
/// pushes further objects down into one of four lazily created quadrant children.
/// The index owns the handles it is given (references, `Rc`s, ids) but never the objects
/// behind them.
///
/// All mutation goes through `&mut self`; share an index across threads behind a lock.
///
/// Deeply clustered inputs produce deep trees. Rebalancing and dropping walk the tree
/// recursively, so extremely degenerate inputs can exhaust the stack; see
/// [`depth`](Self::depth).
#[derive(Clone)]
pub struct QuadIndex<T> {
    root: QuadNode<T>,
    config: QuadIndexConfig,
    len: usize,
}

impl<T> Default for QuadIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for QuadIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadIndex")
            .field("bounds", &self.root.rect)
            .field("len", &self.len)
            .field("bucket_size", &self.config.bucket_size)
            .field("allow_expand", &self.config.allow_expand)
            .finish_non_exhaustive()
    }
}

impl<T> QuadIndex<T> {
    /// Create an empty index with zero bounds, the default bucket size, and expansion enabled.
    ///
    /// The first insertion away from the origin grows the bounds.
    pub fn new() -> Self {
        Self::with_config(Rect::ZERO, QuadIndexConfig::default())
    }

    /// Create an empty index with zero bounds and the given bucket size.
    pub fn with_bucket_size(bucket_size: usize) -> Self {
        Self::with_config(
            Rect::ZERO,
            QuadIndexConfig {
                bucket_size,
                ..Default::default()
            },
        )
    }

    /// Create an empty index covering `bounds` (`x0, y0` top-left, `x1, y1` bottom-right).
    pub fn with_bounds(bounds: Rect) -> Self {
        Self::with_config(bounds, QuadIndexConfig::default())
    }

    /// Create an empty index covering `bounds` with the given bucket size.
    pub fn with_bounds_and_bucket_size(bounds: Rect, bucket_size: usize) -> Self {
        Self::with_config(
            bounds,
            QuadIndexConfig {
                bucket_size,
                ..Default::default()
            },
        )
    }

    /// Create an empty index covering `bounds` with explicit configuration.
    ///
    /// Inverted rectangles are normalized. Non-finite bounds are reported by the first
    /// [`add`](Self::add).
    pub fn with_config(bounds: Rect, config: QuadIndexConfig) -> Self {
        Self {
            root: QuadNode::new(bounds.abs()),
            config: config.normalized(),
            len: 0,
        }
    }

    /// The root rectangle: `(x0, y0)` is the top-left corner, `(x1, y1)` the bottom-right.
    pub fn bounds(&self) -> Rect {
        self.root.rect
    }

    /// Objects held per node before descending. Fixed at construction.
    pub fn bucket_size(&self) -> usize {
        self.config.bucket_size
    }

    /// Whether out-of-bounds insertions grow the bounds.
    pub fn allows_expand(&self) -> bool {
        self.config.allow_expand
    }

    /// Enable or disable bounds expansion for subsequent insertions.
    pub fn set_allow_expand(&mut self, allow: bool) {
        self.config.allow_expand = allow;
    }

    /// The configuration this index runs with.
    pub fn config(&self) -> QuadIndexConfig {
        self.config
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index stores no objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the root has any child node.
    pub fn has_children(&self) -> bool {
        self.root.has_children()
    }

    /// Number of node levels, counting the root.
    ///
    /// Rebalancing recurses this deep.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Drop every stored handle and child node, keeping bounds and configuration.
    pub fn clear(&mut self) {
        self.root = QuadNode::new(self.root.rect);
        self.len = 0;
    }

    /// Iterate every stored object once, in pre-order: a node's bucket, then its children
    /// in [`Quadrant::ALL`] order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut stack = Vec::new();
        stack.extend(self.root.children().rev());
        Iter {
            stack,
            current: self.root.bucket.iter(),
        }
    }

    /// Collect every stored object in [`iter`](Self::iter) order.
    pub fn all_objects(&self) -> Vec<&T> {
        self.iter().collect()
    }
}

impl<T: Positioned> QuadIndex<T> {
    /// Build an index whose bounds are the smallest rectangle covering `objects`, then add
    /// them all.
    ///
    /// An empty input yields zero bounds.
    pub fn from_objects<I>(objects: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_objects_with_bucket_size(objects, QuadIndexConfig::DEFAULT_BUCKET_SIZE)
    }

    /// Like [`from_objects`](Self::from_objects) with an explicit bucket size.
    pub fn from_objects_with_bucket_size<I>(
        objects: I,
        bucket_size: usize,
    ) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = T>,
    {
        let objects: Vec<T> = objects.into_iter().collect();
        for object in &objects {
            check_finite(object.position())?;
        }
        let bounds = bounding_rect(objects.iter().map(Positioned::position)).unwrap_or(Rect::ZERO);
        let mut index = Self::with_bounds_and_bucket_size(bounds, bucket_size);
        index.add_all(objects)?;
        Ok(index)
    }

    /// Insert an object at its current position.
    ///
    /// A position outside the bounds grows the bounds just enough to include it and
    /// rebalances the whole tree, unless expansion is disabled, in which case the object is
    /// rejected with [`IndexError::OutOfBounds`].
    ///
    /// Growing rebuilds the tree from the positions the stored handles report now. A stored
    /// handle whose position has become NaN or infinite since it was added cannot be placed
    /// again and is dropped from the index, which also lowers [`len`](Self::len).
    ///
    /// ```
    /// use bucket_quadtree::{IndexError, QuadIndex, QuadIndexConfig};
    /// use kurbo::{Point, Rect};
    ///
    /// let mut idx = QuadIndex::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
    /// idx.add(Point::new(25.0, -5.0)).unwrap();
    /// assert_eq!(idx.bounds(), Rect::new(0.0, -5.0, 25.0, 10.0));
    ///
    /// let fixed = QuadIndexConfig { allow_expand: false, ..Default::default() };
    /// let mut idx = QuadIndex::with_config(Rect::new(0.0, 0.0, 10.0, 10.0), fixed);
    /// assert_eq!(
    ///     idx.add(Point::new(25.0, 5.0)),
    ///     Err(IndexError::OutOfBounds { x: 25.0, y: 5.0 })
    /// );
    /// ```
    pub fn add(&mut self, object: T) -> Result<(), IndexError> {
        let pos = object.position();
        check_finite(pos)?;
        if !self.root.rect.is_finite() {
            return Err(IndexError::NonFiniteBounds);
        }
        if Quadrant::classify(pos, self.root.rect).is_none() {
            if !self.config.allow_expand {
                return Err(IndexError::OutOfBounds { x: pos.x, y: pos.y });
            }
            let grown = self.root.rect.union_pt(pos);
            tracing::debug!(
                x = pos.x,
                y = pos.y,
                x0 = grown.x0,
                y0 = grown.y0,
                x1 = grown.x1,
                y1 = grown.y1,
                "expanding bounds"
            );
            // The grown bounds cover every finite position, so only handles that turned
            // non-finite are evicted; `rebalance` logs them.
            let _ = self.rebalance(grown);
        }
        self.root.insert(object, pos, self.config.bucket_size);
        self.len += 1;
        Ok(())
    }

    /// Add every object, continuing past failures.
    ///
    /// Returns `Ok` only if every object was stored; otherwise the first error.
    pub fn add_all<I>(&mut self, objects: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut first_error = None;
        for object in objects {
            if let Err(err) = self.add(object) {
                tracing::debug!(%err, "rejected object");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Remove and return the first object found exactly at `position`.
    ///
    /// With several objects at the same position, which one is removed is unspecified.
    pub fn remove(&mut self, position: Point) -> Option<T> {
        let removed = self.root.remove(position)?;
        self.len -= 1;
        Some(removed)
    }

    /// The object stored exactly at `position`, if any.
    pub fn find(&self, position: Point) -> Option<&T> {
        self.root.find(position)
    }

    /// Whether an object is stored exactly at `position`.
    pub fn contains(&self, position: Point) -> bool {
        self.find(position).is_some()
    }

    /// A close object to `position`, found quickly but not necessarily the closest.
    ///
    /// The search follows a single root-to-leaf path chosen by comparing `position` with
    /// each node's center and scans only the buckets on that path. It never backtracks into
    /// sibling quadrants, so a strictly closer object just across a center line can be
    /// missed. Returns `None` only when the index is empty.
    pub fn find_nearest(&self, position: Point) -> Option<&T> {
        self.root.nearest(position)
    }

    /// Replace the bounds and rebuild the tree against them.
    ///
    /// Every node rectangle is recomputed from the new root rectangle, then every object is
    /// drained and reinserted. When expansion is enabled the bounds first grow to cover all
    /// stored objects. Objects that still fall outside are removed from the index and
    /// returned.
    pub fn set_bounds(&mut self, bounds: Rect) -> Result<Vec<T>, IndexError> {
        if !bounds.is_finite() {
            return Err(IndexError::NonFiniteBounds);
        }
        Ok(self.rebalance(bounds.abs()))
    }

    fn rebalance(&mut self, bounds: Rect) -> Vec<T> {
        self.root.retile(bounds);
        let mut drained = Vec::with_capacity(self.len);
        self.root.drain_into(&mut drained);

        if self.config.allow_expand {
            let covering = drained
                .iter()
                .map(Positioned::position)
                .filter(|p| p.is_finite())
                .fold(bounds, |r, p| r.union_pt(p));
            if covering != bounds {
                self.root.retile(covering);
            }
        }

        tracing::debug!(
            objects = drained.len(),
            x0 = self.root.rect.x0,
            y0 = self.root.rect.y0,
            x1 = self.root.rect.x1,
            y1 = self.root.rect.y1,
            "rebalancing"
        );

        let bucket_size = self.config.bucket_size;
        let mut evicted = Vec::new();
        for object in drained {
            let pos = object.position();
            if Quadrant::classify(pos, self.root.rect).is_some() {
                self.root.insert(object, pos, bucket_size);
            } else {
                evicted.push(object);
            }
        }
        self.root.prune();

        if !evicted.is_empty() {
            tracing::warn!(
                evicted = evicted.len(),
                "objects fell outside the new bounds"
            );
            self.len -= evicted.len();
        }
        evicted
    }
}

impl<T: Positioned> Extend<T> for QuadIndex<T> {
    /// Adds every object like [`QuadIndex::add_all`], discarding rejections.
    fn extend<I: IntoIterator<Item = T>>(&mut self, objects: I) {
        // Rejections are already logged by `add_all`.
        let _ = self.add_all(objects);
    }
}

impl<'a, T> IntoIterator for &'a QuadIndex<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the objects of a [`QuadIndex`], created by [`QuadIndex::iter`].
pub struct Iter<'a, T> {
    stack: Vec<&'a QuadNode<T>>,
    current: core::slice::Iter<'a, T>,
}

impl<T> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("pending_nodes", &self.stack.len())
            .field("pending_in_bucket", &self.current.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(object) = self.current.next() {
                return Some(object);
            }
            let node = self.stack.pop()?;
            self.stack.extend(node.children().rev());
            self.current = node.bucket.iter();
        }
    }
}

fn check_finite(pos: Point) -> Result<(), IndexError> {
    if pos.is_finite() {
        Ok(())
    } else {
        Err(IndexError::NonFinitePosition { x: pos.x, y: pos.y })
    }
}
