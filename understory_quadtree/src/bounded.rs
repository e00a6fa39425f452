// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between the tree and the objects it stores.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use kurbo::Rect;

/// An object with a current axis-aligned bounding rectangle.
///
/// The tree reads [`bounds`](Bounded::bounds) when an object is inserted and
/// whenever it is told the bounds may have changed, either through
/// [`QuadTree::modify`](crate::QuadTree::modify) or
/// [`QuadTree::relocate`](crate::QuadTree::relocate).
/// Between those notifications the tree keeps using the bounds it last saw.
///
/// Coordinates must be finite. Reversed rectangles (`x1 < x0` or `y1 < y0`)
/// are normalized with [`Rect::abs`] when read.
pub trait Bounded {
    /// The current bounding rectangle.
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Bounds that can change behind a shared reference, e.g. `Rc<Cell<Rect>>`.
impl Bounded for Cell<Rect> {
    fn bounds(&self) -> Rect {
        self.get()
    }
}

/// A rectangle with an attached payload.
impl<P> Bounded for (Rect, P) {
    fn bounds(&self) -> Rect {
        self.0
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Bounded + ?Sized> Bounded for Box<T> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Bounded + ?Sized> Bounded for Rc<T> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}
