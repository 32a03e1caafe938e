//! An iterator adapter that clamps ranges to given bounds.
use std::ops::Range;

/// Iterator adapter that yields the intersection of each input range with `bounds`.
///
/// Input order is preserved and overlapping inputs are not merged: a doc list
/// such as `5, 1-10` keeps both ranges as entered.
#[derive(Debug, Clone)]
pub struct ClampedRanges<I>
where
    I: Iterator<Item = Range<u64>>,
{
    inner: I,
    bounds: Range<u64>,
}

impl<I> ClampedRanges<I>
where
    I: Iterator<Item = Range<u64>>,
{
    pub fn new(inner: I, bounds: Range<u64>) -> Self {
        Self { inner, bounds }
    }
}

impl<I> Iterator for ClampedRanges<I>
where
    I: Iterator<Item = Range<u64>>,
{
    type Item = Range<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        for r in self.inner.by_ref() {
            let start = r.start.max(self.bounds.start);
            let end = r.end.min(self.bounds.end);
            if start < end {
                return Some(start..end);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}
