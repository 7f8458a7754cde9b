// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes: bucket storage, lazily created children, and the walks over them.
//!
//! Point walks (insert, find, remove, nearest) are iterative. The whole-tree passes used
//! by rebalancing (retile, drain, prune) recurse, as does dropping a node, so their stack
//! use grows with tree depth.

use alloc::boxed::Box;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{Positioned, Quadrant};

type Children<T> = [Option<Box<QuadNode<T>>>; 4];

#[derive(Clone)]
pub(crate) struct QuadNode<T> {
    pub(crate) rect: Rect,
    pub(crate) bucket: Vec<T>,
    children: Children<T>,
}

impl<T> QuadNode<T> {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            bucket: Vec::new(),
            children: [None, None, None, None],
        }
    }

    pub(crate) fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children[quadrant.index()].as_deref()
    }

    pub(crate) fn child_mut(&mut self, quadrant: Quadrant) -> Option<&mut Self> {
        self.children[quadrant.index()].as_deref_mut()
    }

    /// The child for `quadrant`, created on first use.
    fn child_or_insert(&mut self, quadrant: Quadrant) -> &mut Self {
        let rect = self.rect;
        self.children[quadrant.index()].get_or_insert_with(|| {
            let child_rect = quadrant.rect_of(rect);
            tracing::trace!(
                ?quadrant,
                x0 = child_rect.x0,
                y0 = child_rect.y0,
                x1 = child_rect.x1,
                y1 = child_rect.y1,
                "creating child node"
            );
            Box::new(Self::new(child_rect))
        })
    }

    /// Present children in quadrant order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = &Self> {
        self.children.iter().filter_map(|c| c.as_deref())
    }

    pub(crate) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Number of node levels from here down, counting this node.
    pub(crate) fn depth(&self) -> usize {
        1 + self.children().map(Self::depth).max().unwrap_or(0)
    }

    /// Overwrite this subtree's rectangles with the partition of `rect`.
    pub(crate) fn retile(&mut self, rect: Rect) {
        self.rect = rect;
        for quadrant in Quadrant::ALL {
            if let Some(child) = self.child_mut(quadrant) {
                child.retile(quadrant.rect_of(rect));
            }
        }
    }

    /// Move every stored object into `out` in pre-order, leaving the buckets empty.
    pub(crate) fn drain_into(&mut self, out: &mut Vec<T>) {
        out.append(&mut self.bucket);
        for child in self.children.iter_mut().flatten() {
            child.drain_into(out);
        }
    }

    /// Drop every child subtree that holds no objects. Returns whether this node is now
    /// empty and childless.
    pub(crate) fn prune(&mut self) -> bool {
        for slot in &mut self.children {
            if slot.as_deref_mut().is_some_and(Self::prune) {
                *slot = None;
            }
        }
        self.bucket.is_empty() && !self.has_children()
    }

    /// Store `object` in the first node along its quadrant path that has bucket room.
    ///
    /// `pos` must already be inside this node's rectangle.
    pub(crate) fn insert(&mut self, object: T, pos: Point, bucket_size: usize) {
        let mut node = self;
        loop {
            if node.bucket.len() < bucket_size {
                node.bucket.push(object);
                return;
            }
            // Children tile their parent, so the inclusive classification only misses on
            // rounding at extreme magnitudes; steer by the center then.
            let quadrant = Quadrant::classify(pos, node.rect)
                .unwrap_or_else(|| Quadrant::toward(pos, node.rect));
            node = node.child_or_insert(quadrant);
        }
    }
}

impl<T: Positioned> QuadNode<T> {
    /// First object stored exactly at `pos` along its quadrant path.
    pub(crate) fn find(&self, pos: Point) -> Option<&T> {
        let mut node = self;
        loop {
            if let Some(found) = node.bucket.iter().find(|o| o.position() == pos) {
                return Some(found);
            }
            node = node.child(Quadrant::classify(pos, node.rect)?)?;
        }
    }

    /// Remove and return the first object stored exactly at `pos` along its quadrant path.
    pub(crate) fn remove(&mut self, pos: Point) -> Option<T> {
        let mut node = self;
        loop {
            if let Some(i) = node.bucket.iter().position(|o| o.position() == pos) {
                return Some(node.bucket.remove(i));
            }
            node = node.child_mut(Quadrant::classify(pos, node.rect)?)?;
        }
    }

    /// Closest object seen along the single center-steered path towards `pos`.
    ///
    /// Only the buckets of visited nodes are scanned and sibling subtrees are never
    /// revisited, so a closer object in an unvisited quadrant can be missed.
    pub(crate) fn nearest(&self, pos: Point) -> Option<&T> {
        let mut best: Option<(&T, f64)> = None;
        let mut next = Some(self);
        while let Some(node) = next {
            for object in &node.bucket {
                let d = object.position().distance_squared(pos);
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((object, d));
                }
            }
            next = node.child(Quadrant::toward(pos, node.rect));
        }
        best.map(|(object, _)| object)
    }
}
