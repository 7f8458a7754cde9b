// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use alloc::boxed::Box;
use alloc::rc::Rc;
use kurbo::{Point, Rect};

/// Anything that can be stored in a [`QuadIndex`](crate::QuadIndex).
///
/// The index stores handles (references, `Rc`s, ids carrying a position, ...) and reads the
/// position through this trait whenever it needs to classify an object.
/// Positions are read at call time; the index does not track moving objects, so callers
/// should [`remove`](crate::QuadIndex::remove) and re-[`add`](crate::QuadIndex::add) an
/// object when it moves.
pub trait Positioned {
    /// Current position of the object.
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Point {
        (**self).position()
    }
}

impl<T: Positioned + ?Sized> Positioned for &mut T {
    fn position(&self) -> Point {
        (**self).position()
    }
}

impl<T: Positioned + ?Sized> Positioned for Box<T> {
    fn position(&self) -> Point {
        (**self).position()
    }
}

impl<T: Positioned + ?Sized> Positioned for Rc<T> {
    fn position(&self) -> Point {
        (**self).position()
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<T: Positioned + ?Sized> Positioned for alloc::sync::Arc<T> {
    fn position(&self) -> Point {
        (**self).position()
    }
}

/// One of the four equal sub-rectangles obtained by splitting a rectangle at its center.
///
/// The discriminant doubles as the child slot index, so [`Quadrant::ALL`] is also the
/// order in which children are visited by traversals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Left of and above the center (smaller `x`, smaller `y`).
    TopLeft = 0,
    /// Right of the center, above it.
    TopRight = 1,
    /// Left of the center, below it.
    BottomLeft = 2,
    /// Right of and below the center.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child slot order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Child slot index of this quadrant.
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn from_halves(left: bool, top: bool) -> Self {
        match (left, top) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }

    /// Classify `pos` against `rect`, returning `None` when the point lies outside it.
    ///
    /// The left/top halves are closed on both ends (`x0 <= x <= center.x`), the right/bottom
    /// halves are open towards the center (`center.x < x <= x1`). A point exactly on the
    /// center lines therefore belongs to the upper/left neighbor, and a point on the outer
    /// bottom/right edge belongs to the bottom/right quadrant.
    /// NaN coordinates never classify.
    pub fn classify(pos: Point, rect: Rect) -> Option<Self> {
        let mid = rect.center();
        let left = if rect.x0 <= pos.x && pos.x <= mid.x {
            true
        } else if mid.x < pos.x && pos.x <= rect.x1 {
            false
        } else {
            return None;
        };
        let top = if rect.y0 <= pos.y && pos.y <= mid.y {
            true
        } else if mid.y < pos.y && pos.y <= rect.y1 {
            false
        } else {
            return None;
        };
        Some(Self::from_halves(left, top))
    }

    /// Classify `pos` by comparing it with the center of `rect` only.
    ///
    /// Unlike [`Quadrant::classify`] this ignores the rectangle extents, so every point
    /// resolves to exactly one quadrant. Used to steer nearest-neighbor descent.
    pub fn toward(pos: Point, rect: Rect) -> Self {
        let mid = rect.center();
        Self::from_halves(pos.x <= mid.x, pos.y <= mid.y)
    }

    /// The sub-rectangle of `rect` covered by this quadrant.
    pub fn rect_of(self, rect: Rect) -> Rect {
        let mid = rect.center();
        match self {
            Self::TopLeft => Rect::new(rect.x0, rect.y0, mid.x, mid.y),
            Self::TopRight => Rect::new(mid.x, rect.y0, rect.x1, mid.y),
            Self::BottomLeft => Rect::new(rect.x0, mid.y, mid.x, rect.y1),
            Self::BottomRight => Rect::new(mid.x, mid.y, rect.x1, rect.y1),
        }
    }
}

/// Smallest rectangle covering every point, or `None` for an empty input.
pub(crate) fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            Some(r) => r.union_pt(p),
            None => Rect::from_points(p, p),
        })
    })
}
