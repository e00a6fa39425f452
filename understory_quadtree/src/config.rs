// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree configuration.

use kurbo::Size;

use crate::error::QuadTreeError;

/// Split and merge parameters of a [`QuadTree`](crate::QuadTree).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// Smallest node size. A node whose quarters would be narrower or shorter
    /// than this stays a leaf no matter how many objects it holds.
    /// The initial root is also sized in multiples of this extent.
    pub min_leaf_size: Size,
    /// A leaf splits when an insert would push its object count above this.
    /// A subtree merges back into its top node once its total count drops to this or below.
    pub max_objects_per_leaf: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            min_leaf_size: Size::new(32.0, 32.0),
            max_objects_per_leaf: 8,
        }
    }
}

impl QuadTreeConfig {
    /// Create a configuration from its two parameters.
    pub const fn new(min_leaf_size: Size, max_objects_per_leaf: usize) -> Self {
        Self {
            min_leaf_size,
            max_objects_per_leaf,
        }
    }

    /// Replace the minimum leaf size.
    #[must_use]
    pub const fn with_min_leaf_size(mut self, min_leaf_size: Size) -> Self {
        self.min_leaf_size = min_leaf_size;
        self
    }

    /// Replace the per-leaf object threshold.
    #[must_use]
    pub const fn with_max_objects_per_leaf(mut self, max_objects_per_leaf: usize) -> Self {
        self.max_objects_per_leaf = max_objects_per_leaf;
        self
    }

    /// Check that the parameters describe a usable tree.
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        let Size { width, height } = self.min_leaf_size;
        if !(width.is_finite() && height.is_finite()) {
            return Err(QuadTreeError::InvalidConfig("min_leaf_size must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(QuadTreeError::InvalidConfig(
                "min_leaf_size must be strictly positive",
            ));
        }
        if self.max_objects_per_leaf == 0 {
            return Err(QuadTreeError::InvalidConfig(
                "max_objects_per_leaf must be at least 1",
            ));
        }
        Ok(())
    }
}
