// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-level helpers over packed `u64` bit storage.
//!
//! Bit `i` lives in word `i / 64` at position `i % 64`. All ranges are
//! half-open `start..end` in bit offsets.

pub(crate) const WORD_BITS: usize = 64;

/// Number of words needed to hold `len` bits.
pub(crate) const fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Mask of the bits of the last word that lie inside `len`.
pub(crate) const fn tail_mask(len: usize) -> u64 {
    match len % WORD_BITS {
        0 => u64::MAX,
        rem => (1_u64 << rem) - 1,
    }
}

/// Mask with bits `lo..hi` set, for `lo < hi <= 64`.
const fn span_mask(lo: usize, hi: usize) -> u64 {
    let upper = if hi == WORD_BITS {
        u64::MAX
    } else {
        (1_u64 << hi) - 1
    };
    upper & !((1_u64 << lo) - 1)
}

/// Calls `f(word_index, mask)` for every word touched by `start..end`.
fn for_each_span(start: usize, end: usize, mut f: impl FnMut(usize, u64)) {
    if start >= end {
        return;
    }
    let first = start / WORD_BITS;
    let last = (end - 1) / WORD_BITS;
    for index in first..=last {
        let lo = if index == first { start % WORD_BITS } else { 0 };
        let hi = if index == last {
            (end - 1) % WORD_BITS + 1
        } else {
            WORD_BITS
        };
        f(index, span_mask(lo, hi));
    }
}

pub(crate) fn get(words: &[u64], bit: usize) -> bool {
    words[bit / WORD_BITS] & (1_u64 << (bit % WORD_BITS)) != 0
}

pub(crate) fn set(words: &mut [u64], bit: usize, flag: bool) {
    let mask = 1_u64 << (bit % WORD_BITS);
    if flag {
        words[bit / WORD_BITS] |= mask;
    } else {
        words[bit / WORD_BITS] &= !mask;
    }
}

/// Sets every bit in `start..end` to `flag`.
pub(crate) fn fill(words: &mut [u64], start: usize, end: usize, flag: bool) {
    for_each_span(start, end, |index, mask| {
        if flag {
            words[index] |= mask;
        } else {
            words[index] &= !mask;
        }
    });
}

/// Counts set bits in `start..end`.
pub(crate) fn count(words: &[u64], start: usize, end: usize) -> usize {
    let mut total = 0;
    for_each_span(start, end, |index, mask| {
        total += (words[index] & mask).count_ones() as usize;
    });
    total
}

/// Offset of the lowest set bit in `start..end`.
pub(crate) fn first_set(words: &[u64], start: usize, end: usize) -> Option<usize> {
    let mut found = None;
    for_each_span(start, end, |index, mask| {
        if found.is_none() {
            let hits = words[index] & mask;
            if hits != 0 {
                found = Some(index * WORD_BITS + hits.trailing_zeros() as usize);
            }
        }
    });
    found
}

/// Offset of the highest set bit in `start..end`.
pub(crate) fn last_set(words: &[u64], start: usize, end: usize) -> Option<usize> {
    let mut found = None;
    for_each_span(start, end, |index, mask| {
        let hits = words[index] & mask;
        if hits != 0 {
            found = Some(index * WORD_BITS + (WORD_BITS - 1 - hits.leading_zeros() as usize));
        }
    });
    found
}
