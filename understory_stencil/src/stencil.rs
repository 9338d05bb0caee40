// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stencil capability trait.

use crate::error::StencilError;
use crate::region::Region;

/// A fixed-size grid of activity flags addressed in row-major order.
///
/// Cell `(x, y)` has the flat offset `x + y * width`. Dimensions never
/// change after construction. Every fallible operation validates its
/// arguments before touching any cell, so an `Err` always leaves the
/// stencil unmodified.
///
/// [`RegionBuffer`](crate::RegionBuffer) is the implementation provided by
/// this crate.
///
/// # Example
///
/// A typical frame cycle accumulates damage, flushes the bounding region,
/// and starts over:
///
/// ```
/// use understory_stencil::{Region, RegionBuffer, Stencil};
///
/// let mut damage = RegionBuffer::new(16, 16).unwrap();
/// damage.merge_region(Region::new(1, 1, 2, 2)).unwrap();
/// damage.merge_region(Region::new(6, 3, 1, 1)).unwrap();
///
/// let redraw = damage.take_bounding_region();
/// assert_eq!(redraw, Region::new(1, 1, 6, 3));
/// assert!(damage.bounding_region().is_empty());
/// ```
#[allow(
    clippy::len_without_is_empty,
    reason = "`len` counts cells; emptiness of the activity set is `is_clear`"
)]
pub trait Stencil {
    /// Number of columns.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// Total number of cells, `width * height`.
    fn len(&self) -> usize;

    /// Returns `true` if no cell is active.
    fn is_clear(&self) -> bool;

    /// Returns the flag of cell `(x, y)`.
    fn get(&self, x: u32, y: u32) -> Result<bool, StencilError>;

    /// Sets the flag of cell `(x, y)`.
    fn set(&mut self, x: u32, y: u32, flag: bool) -> Result<(), StencilError>;

    /// Returns the flag at a row-major flat offset.
    fn get_offset(&self, offset: usize) -> Result<bool, StencilError>;

    /// Sets the flag at a row-major flat offset.
    fn set_offset(&mut self, offset: usize, flag: bool) -> Result<(), StencilError>;

    /// Deactivates every cell.
    fn clear(&mut self) {
        self.set_all(false);
    }

    /// Sets every cell to `flag`.
    fn set_all(&mut self, flag: bool);

    /// Sets every cell of `row` to `flag`.
    fn set_scanline(&mut self, row: u32, flag: bool) -> Result<(), StencilError>;

    /// Activates every cell inside `region`.
    ///
    /// Fails with [`StencilError::OutOfRange`] unless `region` lies within
    /// `[0, width) x [0, height)`. A region ending exactly on the right or
    /// bottom edge is in range.
    fn merge_region(&mut self, region: Region) -> Result<(), StencilError>;

    /// Deactivates every cell inside `region`.
    ///
    /// Validation is the same as for [`merge_region`](Self::merge_region).
    fn remove_region(&mut self, region: Region) -> Result<(), StencilError>;

    /// Counts the active cells in `row`.
    fn active_in_row(&self, row: u32) -> Result<usize, StencilError>;

    /// Returns the smallest region enclosing every active cell, or
    /// [`Region::EMPTY`] if none is active.
    fn bounding_region(&self) -> Region;

    /// Returns the bounding region and clears the stencil.
    fn take_bounding_region(&mut self) -> Region {
        let region = self.bounding_region();
        self.clear();
        region
    }
}
