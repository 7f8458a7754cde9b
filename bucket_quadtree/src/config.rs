// Copyright 2025 the Bucket Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration for [`QuadIndex`](crate::QuadIndex).

/// Settings fixed when an index is created.
///
/// Build one with struct-update syntax:
///
/// ```
/// use bucket_quadtree::QuadIndexConfig;
///
/// let config = QuadIndexConfig { bucket_size: 8, ..Default::default() };
/// assert!(config.allow_expand);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadIndexConfig {
    /// Objects held directly by a node before insertion descends into a child.
    ///
    /// Never changes over the lifetime of an index. Zero is clamped to one.
    pub bucket_size: usize,
    /// Whether an insertion outside the current bounds grows the bounds (and rebalances)
    /// instead of being rejected. Applies to the whole tree.
    pub allow_expand: bool,
}

impl QuadIndexConfig {
    /// Bucket size used when none is given.
    pub const DEFAULT_BUCKET_SIZE: usize = 3;

    pub(crate) fn normalized(self) -> Self {
        Self {
            bucket_size: self.bucket_size.max(1),
            ..self
        }
    }
}

impl Default for QuadIndexConfig {
    fn default() -> Self {
        Self {
            bucket_size: Self::DEFAULT_BUCKET_SIZE,
            allow_expand: true,
        }
    }
}
