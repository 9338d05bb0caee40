// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed region buffer.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Not;

use crate::bits::{self, WORD_BITS};
use crate::error::{StencilError, Target};
use crate::region::Region;
use crate::stencil::Stencil;

/// A fixed-size stencil buffer backed by packed `u64` words.
///
/// `RegionBuffer` tracks which cells of a `width x height` raster are active
/// (dirty, visible, needing redraw). Cells are stored row-major, one bit per
/// cell. Bits past the last cell are always zero, so equality and hashing
/// compare contents and shape only.
///
/// The per-cell and region operations come from the [`Stencil`] trait; set
/// algebra between equally shaped buffers is provided here.
///
/// # Example
///
/// ```
/// use understory_stencil::{Region, RegionBuffer, Stencil};
///
/// let mut buf = RegionBuffer::new(10, 10).unwrap();
/// buf.merge_region(Region::new(2, 1, 3, 2)).unwrap();
///
/// assert_eq!(buf.active_in_row(0).unwrap(), 0);
/// assert_eq!(buf.active_in_row(1).unwrap(), 3);
/// assert_eq!(buf.bounding_region(), Region::new(2, 1, 3, 2));
///
/// // Regions touching the far edges are in range.
/// buf.merge_region(Region::new(0, 0, 10, 10)).unwrap();
/// assert_eq!(buf.count_active(), 100);
///
/// // Set algebra produces new buffers.
/// let inverted = !&buf;
/// assert!(inverted.intersection(&buf).unwrap().is_clear());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RegionBuffer {
    width: u32,
    height: u32,
    /// Row-major cell flags; bits at or beyond `width * height` stay zero.
    words: Vec<u64>,
}

impl RegionBuffer {
    /// Width of a buffer built with [`Default`].
    pub const DEFAULT_WIDTH: u32 = 8;
    /// Height of a buffer built with [`Default`].
    pub const DEFAULT_HEIGHT: u32 = 8;

    /// Creates a buffer with every cell inactive.
    ///
    /// Fails with [`StencilError::InvalidArgument`] if either dimension is
    /// zero, exceeds `i32::MAX` (so that every cell is addressable by a
    /// [`Region`]), or if `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, StencilError> {
        let len = Self::checked_len(width, height).ok_or_else(|| {
            tracing::debug!(width, height, "rejected stencil buffer dimensions");
            StencilError::InvalidArgument { width, height }
        })?;
        Ok(Self {
            width,
            height,
            words: vec![0; bits::word_count(len)],
        })
    }

    fn checked_len(width: u32, height: u32) -> Option<usize> {
        let limit = i32::MAX.unsigned_abs();
        if width == 0 || height == 0 || width > limit || height > limit {
            return None;
        }
        usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub fn shape(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of active cells.
    #[must_use]
    pub fn count_active(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns an iterator over the `(x, y)` coordinates of active cells in
    /// row-major order.
    #[must_use]
    pub fn iter_active(&self) -> ActiveCells<'_> {
        ActiveCells {
            words: &self.words,
            width: self.width as usize,
            index: 0,
            bits: self.words.first().copied().unwrap_or(0),
            remaining: self.count_active(),
        }
    }

    /// Returns the cell-wise AND of `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Result<Self, StencilError> {
        self.combine(other, |a, b| a & b)
    }

    /// Returns the cell-wise OR of `self` and `other`.
    pub fn union(&self, other: &Self) -> Result<Self, StencilError> {
        self.combine(other, |a, b| a | b)
    }

    /// Returns the cell-wise XOR of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, StencilError> {
        self.combine(other, |a, b| a ^ b)
    }

    /// Returns a buffer of the same shape with every cell inverted.
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut out = self.clone();
        out.invert();
        out
    }

    /// Keeps only cells that are also active in `other`.
    pub fn intersect_with(&mut self, other: &Self) -> Result<(), StencilError> {
        self.combine_in_place(other, |a, b| a & b)
    }

    /// Activates every cell that is active in `other`.
    pub fn union_with(&mut self, other: &Self) -> Result<(), StencilError> {
        self.combine_in_place(other, |a, b| a | b)
    }

    /// Toggles every cell that is active in `other`.
    pub fn symmetric_difference_with(&mut self, other: &Self) -> Result<(), StencilError> {
        self.combine_in_place(other, |a, b| a ^ b)
    }

    /// Inverts every cell in place.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.mask_tail();
    }

    fn combine(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Result<Self, StencilError> {
        let mut out = self.clone();
        out.combine_in_place(other, op)?;
        Ok(out)
    }

    fn combine_in_place(
        &mut self,
        other: &Self,
        op: impl Fn(u64, u64) -> u64,
    ) -> Result<(), StencilError> {
        if self.shape() != other.shape() {
            tracing::debug!(
                left = ?self.shape(),
                right = ?other.shape(),
                "stencil buffer shape mismatch"
            );
            return Err(StencilError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        for (word, &rhs) in self.words.iter_mut().zip(&other.words) {
            *word = op(*word, rhs);
        }
        Ok(())
    }

    fn mask_tail(&mut self) {
        let mask = bits::tail_mask(self.len());
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    fn out_of_range(&self, target: Target) -> StencilError {
        tracing::debug!(
            %target,
            width = self.width,
            height = self.height,
            "stencil access out of range"
        );
        StencilError::OutOfRange {
            target,
            width: self.width,
            height: self.height,
        }
    }

    fn cell_offset(&self, x: u32, y: u32) -> Result<usize, StencilError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_range(Target::Cell { x, y }));
        }
        Ok(x as usize + y as usize * self.width as usize)
    }

    fn checked_offset(&self, offset: usize) -> Result<usize, StencilError> {
        if offset >= self.len() {
            return Err(self.out_of_range(Target::Offset(offset)));
        }
        Ok(offset)
    }

    /// Flat offset range `start..end` covered by `row`.
    fn row_span(&self, row: u32) -> Result<(usize, usize), StencilError> {
        if row >= self.height {
            return Err(self.out_of_range(Target::Row(row)));
        }
        let start = row as usize * self.width as usize;
        Ok((start, start + self.width as usize))
    }

    /// Validates `region` against the half-open buffer extent.
    fn check_region(&self, region: Region) -> Result<(), StencilError> {
        if region.x < 0
            || region.y < 0
            || region.width < 0
            || region.height < 0
            || region.right() > i64::from(self.width)
            || region.bottom() > i64::from(self.height)
        {
            return Err(self.out_of_range(Target::Region(region)));
        }
        Ok(())
    }

    fn fill_region(&mut self, region: Region, flag: bool) -> Result<(), StencilError> {
        self.check_region(region)?;
        // Non-negative and within the buffer after the check above.
        let (x, y) = (region.x.unsigned_abs() as usize, region.y.unsigned_abs() as usize);
        let (w, h) = (
            region.width.unsigned_abs() as usize,
            region.height.unsigned_abs() as usize,
        );
        let stride = self.width as usize;
        for row in y..y + h {
            let start = row * stride + x;
            bits::fill(&mut self.words, start, start + w, flag);
        }
        Ok(())
    }
}

impl Default for RegionBuffer {
    /// An 8x8 buffer with every cell inactive.
    fn default() -> Self {
        let len = Self::DEFAULT_WIDTH as usize * Self::DEFAULT_HEIGHT as usize;
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            words: vec![0; bits::word_count(len)],
        }
    }
}

impl Stencil for RegionBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn is_clear(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    fn get(&self, x: u32, y: u32) -> Result<bool, StencilError> {
        let offset = self.cell_offset(x, y)?;
        Ok(bits::get(&self.words, offset))
    }

    fn set(&mut self, x: u32, y: u32, flag: bool) -> Result<(), StencilError> {
        let offset = self.cell_offset(x, y)?;
        bits::set(&mut self.words, offset, flag);
        Ok(())
    }

    fn get_offset(&self, offset: usize) -> Result<bool, StencilError> {
        let offset = self.checked_offset(offset)?;
        Ok(bits::get(&self.words, offset))
    }

    fn set_offset(&mut self, offset: usize, flag: bool) -> Result<(), StencilError> {
        let offset = self.checked_offset(offset)?;
        bits::set(&mut self.words, offset, flag);
        Ok(())
    }

    fn set_all(&mut self, flag: bool) {
        tracing::trace!(flag, width = self.width, height = self.height, "set all cells");
        self.words.fill(if flag { u64::MAX } else { 0 });
        self.mask_tail();
    }

    fn set_scanline(&mut self, row: u32, flag: bool) -> Result<(), StencilError> {
        let (start, end) = self.row_span(row)?;
        bits::fill(&mut self.words, start, end, flag);
        Ok(())
    }

    fn merge_region(&mut self, region: Region) -> Result<(), StencilError> {
        self.fill_region(region, true)
    }

    fn remove_region(&mut self, region: Region) -> Result<(), StencilError> {
        self.fill_region(region, false)
    }

    fn active_in_row(&self, row: u32) -> Result<usize, StencilError> {
        let (start, end) = self.row_span(row)?;
        Ok(bits::count(&self.words, start, end))
    }

    fn bounding_region(&self) -> Region {
        let len = self.len();
        let (Some(first), Some(last)) = (
            bits::first_set(&self.words, 0, len),
            bits::last_set(&self.words, 0, len),
        ) else {
            return Region::EMPTY;
        };
        let stride = self.width as usize;
        let (ymin, ymax) = (first / stride, last / stride);

        let mut xmin = stride;
        let mut xmax = 0;
        for row in ymin..=ymax {
            let start = row * stride;
            let end = start + stride;
            // Only columns outside the running [xmin, xmax] can widen it.
            if let Some(lo) = bits::first_set(&self.words, start, start + xmin) {
                xmin = lo - start;
            }
            if let Some(hi) = bits::last_set(&self.words, start + xmax, end) {
                xmax = hi - start;
            }
        }

        Region::new(
            coord(xmin),
            coord(ymin),
            coord(xmax - xmin + 1),
            coord(ymax - ymin + 1),
        )
    }
}

/// Converts an in-buffer coordinate to `i32`; dimensions are capped at
/// `i32::MAX` on construction.
fn coord(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Not for RegionBuffer {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.invert();
        self
    }
}

impl Not for &RegionBuffer {
    type Output = RegionBuffer;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

impl fmt::Debug for RegionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("active", &self.count_active())
            .finish_non_exhaustive()
    }
}

/// Iterator over the `(x, y)` coordinates of active cells, returned by
/// [`RegionBuffer::iter_active`].
#[derive(Clone, Debug)]
pub struct ActiveCells<'a> {
    words: &'a [u64],
    width: usize,
    /// Index of the word `bits` was loaded from.
    index: usize,
    /// Unvisited set bits of the current word.
    bits: u64,
    remaining: usize,
}

impl Iterator for ActiveCells<'_> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.bits == 0 {
            self.index += 1;
            self.bits = *self.words.get(self.index)?;
        }
        let offset = self.index * WORD_BITS + self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1; // Clear the lowest set bit
        self.remaining -= 1;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "coordinates are bounded by u32 dimensions"
        )]
        let cell = ((offset % self.width) as u32, (offset / self.width) as u32);
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ActiveCells<'_> {}
