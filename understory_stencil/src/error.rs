// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for stencil buffer operations.

use core::fmt;

use crate::region::Region;

/// The access that was rejected by a bounds check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single cell addressed by column and row.
    Cell {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// A single cell addressed by its row-major flat offset.
    Offset(usize),
    /// A whole scanline.
    Row(u32),
    /// A rectangular region.
    Region(Region),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { x, y } => write!(f, "cell ({x}, {y})"),
            Self::Offset(offset) => write!(f, "offset {offset}"),
            Self::Row(row) => write!(f, "row {row}"),
            Self::Region(r) => write!(
                f,
                "region ({}, {}) {}x{}",
                r.x, r.y, r.width, r.height
            ),
        }
    }
}

/// Errors reported by [`RegionBuffer`](crate::RegionBuffer) operations.
///
/// Every variant describes a contract violation by the caller. Operations
/// that fail leave the buffer unmodified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StencilError {
    /// A buffer was requested with a zero dimension, or with dimensions
    /// whose cell count or coordinates cannot be represented.
    InvalidArgument {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// An access fell outside `[0, width) x [0, height)`.
    OutOfRange {
        /// What was being accessed.
        target: Target,
        /// Width of the buffer.
        width: u32,
        /// Height of the buffer.
        height: u32,
    },
    /// A binary operation was applied to buffers of different shapes.
    ShapeMismatch {
        /// `(width, height)` of the left operand.
        left: (u32, u32),
        /// `(width, height)` of the right operand.
        right: (u32, u32),
    },
}

impl fmt::Display for StencilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { width, height } => {
                write!(f, "invalid stencil buffer dimensions {width}x{height}")
            }
            Self::OutOfRange {
                target,
                width,
                height,
            } => write!(f, "{target} is outside the {width}x{height} buffer"),
            Self::ShapeMismatch { left, right } => write!(
                f,
                "buffer shapes differ: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl core::error::Error for StencilError {}
