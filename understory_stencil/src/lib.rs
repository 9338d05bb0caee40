// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Stencil: a fixed-size stencil buffer for dirty-region tracking.
//!
//! This crate tracks which cells of a raster are *active* (dirty, visible,
//! needing redraw) and answers the question a renderer asks once per frame:
//! what is the smallest rectangle that covers everything that changed?
//!
//! - **Regions** ([`Region`]): integer `(x, y, width, height)` rectangles in
//!   cell coordinates, half-open on the right and bottom edges.
//! - **Stencil trait** ([`Stencil`]): per-cell access, scanline and region
//!   mutation, per-row counts, and bounding-region extraction.
//! - **Region buffer** ([`RegionBuffer`]): the packed-bit implementation,
//!   with set algebra (AND, OR, XOR, NOT) between equally shaped buffers.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_stencil::{Region, RegionBuffer, Stencil};
//!
//! let mut damage = RegionBuffer::new(64, 48).unwrap();
//!
//! // Accumulate damage during a frame.
//! damage.merge_region(Region::new(2, 1, 3, 2)).unwrap();
//! damage.merge_region(Region::new(10, 4, 1, 1)).unwrap();
//!
//! // Redraw the minimal covering rectangle, then start the next frame.
//! let redraw = damage.take_bounding_region();
//! assert_eq!(redraw, Region::new(2, 1, 9, 4));
//! assert!(damage.is_clear());
//! ```
//!
//! ## Bounds
//!
//! Every access is checked. Regions must lie within `[0, width) x [0, height)`;
//! a region ending exactly on the far edge (for example the full-buffer
//! region) is valid. Rejected calls return [`StencilError`] and leave the
//! buffer untouched.
//!
//! ## Kurbo Interop
//!
//! [`Region`] converts into [`kurbo::Rect`], and
//! [`Region::from_rect_covering`] maps a float damage rectangle onto the
//! cells it touches.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable either the `std` (default)
//! or `libm` feature so that Kurbo can round rectangles.
//!
//! ## Logging
//!
//! Rejected operations are reported through [`tracing`] at debug level.
//! The crate never installs a subscriber.

#![no_std]

extern crate alloc;

mod bits;
mod buffer;
mod error;
mod region;
mod stencil;

pub use buffer::{ActiveCells, RegionBuffer};
pub use error::{StencilError, Target};
pub use region::Region;
pub use stencil::Stencil;
