//! Flattening of ranges into individual positions.
use std::ops::Range;

/// Iterator adapter that yields each position of each input range in order,
/// stopping once `limit` positions have been produced.
#[derive(Debug, Clone)]
pub struct RangePositions<I>
where
    I: Iterator<Item = Range<u64>>,
{
    inner: I,
    current: Range<u64>,
    remaining: usize,
}

impl<I> RangePositions<I>
where
    I: Iterator<Item = Range<u64>>,
{
    pub fn new(inner: I, limit: usize) -> Self {
        Self {
            inner,
            current: 0..0,
            remaining: limit,
        }
    }
}

impl<I> Iterator for RangePositions<I>
where
    I: Iterator<Item = Range<u64>>,
{
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        while self.current.is_empty() {
            self.current = self.inner.next()?;
        }
        self.remaining -= 1;
        self.current.next()
    }
}

#[cfg(test)]
mod tests {
    use crate::transform::RangeIteratorsExt;

    #[test]
    fn test_positions_in_input_order() {
        let ranges = vec![5..6, 1..4, 7..7, 10..12];
        let positions: Vec<_> = ranges.into_iter().positions(usize::MAX).collect();
        assert_eq!(positions, vec![5, 1, 2, 3, 10, 11]);
    }

    #[test]
    fn test_positions_limit() {
        let ranges = vec![0..1_000_000];
        let positions: Vec<_> = ranges.into_iter().positions(3).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_positions_zero_limit() {
        let ranges = vec![0..10];
        assert_eq!(ranges.into_iter().positions(0).next(), None);
    }
}
