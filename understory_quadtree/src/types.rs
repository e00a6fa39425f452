// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles and quadrant directions.
//!
//! Only object handles leave the tree; node handles stay internal:
//!
//! ```compile_fail
//! use understory_quadtree::types::NodeId;
//! ```

use kurbo::{Point, Rect};

/// Handle of an object stored in a [`QuadTree`](crate::QuadTree).
///
/// This is a small, copyable handle that stays stable while the object moves
/// between nodes, and becomes invalid once the object is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ObjectId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ObjectId`.
///
/// Stale handles never alias a different live object because the generation must match.
/// Use [`QuadTree::contains`](crate::QuadTree::contains) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(pub(crate) u32, pub(crate) u32);

/// Handle of a node in the tree's node arena.
///
/// Nodes are created by splits and root expansion and destroyed by merge-back
/// and root shrink; a `NodeId` goes stale at the next structural change that frees it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct NodeId(pub(crate) u32, pub(crate) u32);

/// One of the four fixed child positions of a node.
///
/// The y axis grows downward, as in Kurbo: north is the smaller y, west the smaller x.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Quadrant {
    /// Top-left quarter.
    NorthWest,
    /// Top-right quarter.
    NorthEast,
    /// Bottom-left quarter.
    SouthWest,
    /// Bottom-right quarter.
    SouthEast,
}

impl Quadrant {
    /// All quadrants in child-slot order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Child-slot index of this quadrant.
    pub const fn index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::NorthEast => 1,
            Self::SouthWest => 2,
            Self::SouthEast => 3,
        }
    }

    /// The diagonally opposite quadrant.
    pub const fn opposite(self) -> Self {
        match self {
            Self::NorthWest => Self::SouthEast,
            Self::NorthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }

    /// The quadrant lying toward `north`/`west` of some reference point.
    pub const fn toward(north: bool, west: bool) -> Self {
        match (north, west) {
            (true, true) => Self::NorthWest,
            (true, false) => Self::NorthEast,
            (false, true) => Self::SouthWest,
            (false, false) => Self::SouthEast,
        }
    }

    /// The part of `rect` this quadrant covers when `rect` is divided at `split`.
    ///
    /// `split` must lie inside `rect`. Dividing at the center yields four equal quarters.
    pub fn sub_rect(self, rect: Rect, split: Point) -> Rect {
        match self {
            Self::NorthWest => Rect::new(rect.x0, rect.y0, split.x, split.y),
            Self::NorthEast => Rect::new(split.x, rect.y0, rect.x1, split.y),
            Self::SouthWest => Rect::new(rect.x0, split.y, split.x, rect.y1),
            Self::SouthEast => Rect::new(split.x, split.y, rect.x1, rect.y1),
        }
    }
}

bitflags::bitflags! {
    /// A set of quadrants.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub(crate) struct QuadrantMask: u8 {
        /// [`Quadrant::NorthWest`].
        const NORTH_WEST = 0b0000_0001;
        /// [`Quadrant::NorthEast`].
        const NORTH_EAST = 0b0000_0010;
        /// [`Quadrant::SouthWest`].
        const SOUTH_WEST = 0b0000_0100;
        /// [`Quadrant::SouthEast`].
        const SOUTH_EAST = 0b0000_1000;
    }
}

impl From<Quadrant> for QuadrantMask {
    fn from(q: Quadrant) -> Self {
        match q {
            Quadrant::NorthWest => Self::NORTH_WEST,
            Quadrant::NorthEast => Self::NORTH_EAST,
            Quadrant::SouthWest => Self::SOUTH_WEST,
            Quadrant::SouthEast => Self::SOUTH_EAST,
        }
    }
}

impl QuadrantMask {
    /// The only quadrant in the set, or `None` if the set is empty or has several.
    pub(crate) fn single(self) -> Option<Quadrant> {
        if self.bits().count_ones() != 1 {
            return None;
        }
        Quadrant::ALL.into_iter().find(|&q| self.contains(q.into()))
    }
}
