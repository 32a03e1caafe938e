//! Iterator adapters for working with `Range<u64>` sequences of document ids.
//!
//! # Provided Adapters
//!
//! - [`clamp::ClampedRanges`]: Intersects each input range with fixed bounds.
//! - [`positions::RangePositions`]: Flattens ranges into individual positions, in input
//!   order, up to a maximum count.

use std::ops::Range;

pub mod clamp;
pub mod positions;

/// Extension trait for more idiomatic usage of the range iterator adapters.
pub trait RangeIteratorsExt: Iterator<Item = Range<u64>> + Sized {
    /// Adapts an iterator of `Range<u64>` to yield only the parts that fall within
    /// `bounds`. Ranges with no overlap are dropped.
    fn clamp_to(self, bounds: Range<u64>) -> clamp::ClampedRanges<Self> {
        clamp::ClampedRanges::new(self, bounds)
    }

    /// Adapts an iterator of `Range<u64>` to yield every position of every range,
    /// stopping after `limit` positions.
    fn positions(self, limit: usize) -> positions::RangePositions<Self> {
        positions::RangePositions::new(self, limit)
    }
}

impl<I: Iterator<Item = Range<u64>>> RangeIteratorsExt for I {}
