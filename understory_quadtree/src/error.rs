// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the quadtree.

use crate::types::ObjectId;

/// Errors returned by [`QuadTree`](crate::QuadTree) operations.
///
/// Broken internal invariants are not reported here; they panic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuadTreeError {
    /// The handle does not refer to an object currently stored in the tree.
    #[error("object {0:?} is not stored in this tree")]
    NotFound(ObjectId),
    /// The configuration was rejected by [`QuadTreeConfig::validate`](crate::QuadTreeConfig::validate).
    #[error("invalid quadtree configuration: {0}")]
    InvalidConfig(&'static str),
}
