// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangles in stencil-buffer coordinates.

use kurbo::Rect;

/// An axis-aligned rectangle `(x, y, width, height)` in cell coordinates.
///
/// Regions are half-open: a region covers columns `x..x + width` and rows
/// `y..y + height`. A region with a non-positive width or height covers no
/// cells and is considered empty; [`Region::EMPTY`] is the canonical empty
/// value returned by [`Stencil::bounding_region`](crate::Stencil::bounding_region)
/// when nothing is active.
///
/// # Example
///
/// ```
/// use understory_stencil::Region;
///
/// let a = Region::new(2, 1, 3, 2);
/// assert_eq!(a.right(), 5);
/// assert_eq!(a.bottom(), 3);
/// assert!(a.contains(4, 2));
/// assert!(!a.contains(5, 2));
///
/// let b = Region::new(4, 0, 2, 2);
/// assert_eq!(a.union(b), Region::new(2, 0, 4, 3));
/// assert_eq!(a.intersect(b), Region::new(4, 1, 1, 1));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Number of columns covered.
    pub width: i32,
    /// Number of rows covered.
    pub height: i32,
}

impl Region {
    /// The empty region: zero extent, no meaningful position.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Creates a region from its origin and extent.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the region covers no cells.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge, `x + width`.
    ///
    /// Computed in `i64` so that it cannot overflow.
    #[must_use]
    pub const fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge, `y + height`.
    #[must_use]
    pub const fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Returns the number of cells covered, or zero for an empty region.
    #[must_use]
    pub const fn area(self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    /// Returns `true` if the cell `(x, y)` lies inside the region.
    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// Returns the smallest region covering both `self` and `other`.
    ///
    /// Empty operands are ignored, so the union of an empty region with `r`
    /// is `r`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Self::from_edges(x0, y0, x1, y1)
    }

    /// Returns the overlap of `self` and `other`, or [`Region::EMPTY`] if
    /// they do not overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if i64::from(x0) >= x1 || i64::from(y0) >= y1 {
            return Self::EMPTY;
        }
        Self::from_edges(x0, y0, x1, y1)
    }

    /// Returns the smallest region whose cells cover `rect`.
    ///
    /// The rectangle is normalized and expanded outward to integer
    /// boundaries, so a damage rectangle in device pixels maps to every
    /// cell it touches. Edges and extents saturate at the `i32` range, so
    /// huge or infinite rectangles clamp instead of overflowing, and NaN
    /// edges read as zero.
    #[must_use]
    pub fn from_rect_covering(rect: Rect) -> Self {
        let rect = rect.abs().expand();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "float to int casts saturate and the rect is already integral"
        )]
        let (x0, y0, x1, y1) = (
            rect.x0 as i64,
            rect.y0 as i64,
            rect.x1 as i64,
            rect.y1 as i64,
        );
        let (x1, y1) = (i64::from(clamp_i32(x1)), i64::from(clamp_i32(y1)));
        Self::from_edges(clamp_i32(x0), clamp_i32(y0), x1, y1)
    }

    fn from_edges(x0: i32, y0: i32, x1: i64, y1: i64) -> Self {
        Self::new(
            x0,
            y0,
            clamp_i32(x1.saturating_sub(i64::from(x0))),
            clamp_i32(y1.saturating_sub(i64::from(y0))),
        )
    }
}

impl From<Region> for Rect {
    fn from(region: Region) -> Self {
        Self::new(
            f64::from(region.x),
            f64::from(region.y),
            region.right() as f64,
            region.bottom() as f64,
        )
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_detection() {
        assert!(Region::EMPTY.is_empty());
        assert!(Region::new(3, 3, 0, 5).is_empty());
        assert!(Region::new(3, 3, 5, -1).is_empty());
        assert!(!Region::new(-2, -2, 1, 1).is_empty());
        assert_eq!(Region::new(0, 0, -4, 2).area(), 0);
        assert_eq!(Region::new(0, 0, 4, 2).area(), 8);
    }

    #[test]
    fn edges_do_not_overflow() {
        let r = Region::new(i32::MAX, i32::MAX, i32::MAX, 1);
        assert_eq!(r.right(), 2 * i64::from(i32::MAX));
        assert_eq!(r.bottom(), i64::from(i32::MAX) + 1);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(1, 1, 2, 2);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(2, 3));
        assert!(!r.contains(0, 1));
    }

    #[test]
    fn union_ignores_empty() {
        let r = Region::new(5, 6, 1, 1);
        assert_eq!(Region::EMPTY.union(r), r);
        assert_eq!(r.union(Region::EMPTY), r);
        assert_eq!(
            r.union(Region::new(0, 0, 2, 2)),
            Region::new(0, 0, 6, 7)
        );
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Region::new(0, 0, 2, 2);
        let b = Region::new(2, 0, 2, 2);
        assert_eq!(a.intersect(b), Region::EMPTY);
        assert_eq!(a.intersect(Region::EMPTY), Region::EMPTY);
    }

    #[test]
    fn rect_round_trip() {
        let region = Region::new(2, 1, 3, 2);
        let rect = Rect::from(region);
        assert_eq!(rect, Rect::new(2.0, 1.0, 5.0, 3.0));
        assert_eq!(Region::from_rect_covering(rect), region);
    }

    #[test]
    fn rect_covering_expands_outward() {
        let rect = Rect::new(4.5, 3.2, 0.5, 1.9);
        assert_eq!(Region::from_rect_covering(rect), Region::new(0, 1, 5, 3));
    }

    #[test]
    fn rect_covering_negative_coordinates() {
        let rect = Rect::new(-3.5, -2.2, -1.1, 0.0);
        assert_eq!(Region::from_rect_covering(rect), Region::new(-4, -3, 3, 3));
    }

    #[test]
    fn rect_covering_saturates_huge_extents() {
        let huge = Rect::new(-1e30, 0.0, 1e30, 1.0);
        assert_eq!(
            Region::from_rect_covering(huge),
            Region::new(i32::MIN, 0, i32::MAX, 1)
        );

        let infinite = Rect::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, 1.0);
        assert_eq!(
            Region::from_rect_covering(infinite),
            Region::new(i32::MIN, 0, i32::MAX, 1)
        );

        let wide = Rect::new(0.0, 0.0, 3e9, 1.0);
        assert_eq!(
            Region::from_rect_covering(wide),
            Region::new(0, 0, i32::MAX, 1)
        );

        let tall = Rect::new(0.0, f64::NEG_INFINITY, 1.0, 0.0);
        assert_eq!(
            Region::from_rect_covering(tall),
            Region::new(0, i32::MIN, 1, i32::MAX)
        );
    }

    #[test]
    fn rect_covering_tolerates_nan() {
        let region = Region::from_rect_covering(Rect::new(f64::NAN, 0.0, 4.0, 2.0));
        assert_eq!(region.y, 0);
        assert_eq!(region.height, 2);
        assert!(region.width >= 0);
    }
}
