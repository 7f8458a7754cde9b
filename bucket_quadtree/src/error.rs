// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for fallible index operations.

use thiserror::Error;

/// Reasons an index operation can fail.
///
/// Lookups never fail; they report absence with `None`.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum IndexError {
    /// The position lies outside the index bounds and expansion is disabled.
    #[error("position ({x}, {y}) is outside the indexed bounds and expansion is disabled")]
    OutOfBounds {
        /// Rejected x coordinate.
        x: f64,
        /// Rejected y coordinate.
        y: f64,
    },
    /// The position has a NaN or infinite coordinate.
    #[error("position ({x}, {y}) is not finite")]
    NonFinitePosition {
        /// Offending x coordinate.
        x: f64,
        /// Offending y coordinate.
        y: f64,
    },
    /// The bounds rectangle has a NaN or infinite coordinate.
    #[error("index bounds are not finite")]
    NonFiniteBounds,
}
