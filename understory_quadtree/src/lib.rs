// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: an adaptive region quadtree for moving AABBs.
//!
//! Understory Quadtree is a broad-phase building block for collision detection and visibility culling
//! where objects move every frame and the index must stay correct without rebuilds.
//!
//! - Insert, move, and remove objects that expose a [`Bounded::bounds`] rectangle.
//! - Query by intersecting rectangle or by point. Results are exact, not a superset.
//! - The root is created on first insert and grows by doubling toward objects outside it.
//! - Leaves split into four equal quadrants when they overflow, and subtrees merge back
//!   once their population drops to the split threshold.
//!
//! Geometry comes from Kurbo: bounds are [`kurbo::Rect`], the minimum leaf size is a [`kurbo::Size`].
//! Float inputs are assumed to be finite (no NaNs, no infinities).
//!
//! ## Structure
//!
//! Every node covers a rectangle and has either no children or exactly four, one per [`Quadrant`],
//! quartering its rectangle. An object is stored at the deepest node whose rectangle fully contains it,
//! so objects straddling a split line stay at the parent. The tree keeps a lookup from each
//! [`ObjectId`] to the node storing it; this is what makes moves and removals cheap.
//!
//! ## Rules
//!
//! - **Split**: inserting into a leaf that already holds
//!   [`max_objects_per_leaf`](QuadTreeConfig::max_objects_per_leaf) objects quarters it, unless the quarters
//!   would be smaller than [`min_leaf_size`](QuadTreeConfig::min_leaf_size). Objects that fit a quarter
//!   move down.
//! - **Root expansion**: while the root does not contain a new object, a root twice as wide and tall is
//!   created toward the object, and the old root becomes its opposite quadrant.
//! - **Merge-back**: after a removal or a move, any subtree holding at most `max_objects_per_leaf` objects
//!   is collapsed into its top node, walking up to the root.
//! - **Root shrink**: when all objects live in a single quadrant of the root, that quadrant becomes the root.
//!
//! ## Moving objects
//!
//! The tree reads an object's bounds when it is inserted and when it is told they changed:
//! - [`QuadTree::modify`] mutates an owned object and updates its placement in one call.
//! - [`QuadTree::relocate`] is for objects whose bounds change behind a shared handle,
//!   such as `Rc<Cell<Rect>>`.
//!
//! If the new bounds still fit the object's leaf, nothing structural happens.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_quadtree::{QuadTree, QuadTreeConfig};
//!
//! let config = QuadTreeConfig::new(Size::new(10.0, 10.0), 2);
//! let mut tree: QuadTree<Rect> = QuadTree::with_config(config).unwrap();
//!
//! let a = tree.insert(Rect::new(0.0, 0.0, 5.0, 5.0));
//! let b = tree.insert(Rect::new(5.0, 0.0, 10.0, 5.0));
//! let c = tree.insert(Rect::new(0.0, 5.0, 5.0, 10.0));
//!
//! // All three overlap the query.
//! assert_eq!(tree.query(Rect::new(0.0, 0.0, 10.0, 10.0)).count(), 3);
//!
//! // Move `a` far away; the root grows to follow it.
//! tree.modify(a, |r| *r = Rect::new(500.0, 500.0, 505.0, 505.0)).unwrap();
//! let hits: Vec<_> = tree.query(Rect::new(490.0, 490.0, 510.0, 510.0)).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].0, a);
//!
//! // Removing objects merges the split-up tree back together.
//! tree.remove(b).unwrap();
//! tree.remove(c).unwrap();
//! assert_eq!(tree.object_count(), 1);
//! assert_eq!(tree.node_count(), 1);
//! ```
//!
//! Objects with shared, externally mutated bounds use [`QuadTree::relocate`]:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_quadtree::QuadTree;
//!
//! let body = Rc::new(Cell::new(Rect::new(0.0, 0.0, 4.0, 4.0)));
//! let mut tree: QuadTree<Rc<Cell<Rect>>> = QuadTree::new();
//! let id = tree.insert(body.clone());
//!
//! body.set(Rect::new(300.0, 0.0, 304.0, 4.0));
//! tree.relocate(id).unwrap();
//! assert_eq!(tree.query(Rect::new(299.0, 0.0, 301.0, 1.0)).count(), 1);
//! ```
//!
//! ## Logging
//!
//! Structural changes (root creation, expansion and shrink, splits, merges) are reported at
//! `debug` level through the [`log`] facade; per-object moves at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
pub mod bounded;
pub mod config;
pub mod error;
mod node;
pub mod tree;
pub mod types;
mod util;

pub use bounded::Bounded;
pub use config::QuadTreeConfig;
pub use error::QuadTreeError;
pub use tree::QuadTree;
pub use types::{ObjectId, Quadrant};
