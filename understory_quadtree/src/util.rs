// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Whether `outer` fully contains `inner`. Edges are inclusive.
pub(crate) fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Whether two rectangles share any point. Touching edges count.
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Whether `rect` contains `pt`. Edges are inclusive, unlike `Rect::contains`.
pub(crate) fn contains_point(rect: Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}

/// Ceiling of a non-negative finite value, without `std`.
pub(crate) fn ceil_non_negative(v: f64) -> f64 {
    debug_assert!(v >= 0.0 && v.is_finite(), "expected a non-negative finite value");
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the first half of the ceiling."
    )]
    let t = v as u64 as f64;
    if t < v { t + 1.0 } else { t }
}

pub(crate) fn is_finite_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}
