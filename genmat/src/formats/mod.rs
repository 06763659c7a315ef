//! Storage format family
//!
//! Interchangeable [`StorageFormat`](genmat_core::StorageFormat)
//! implementations. Each format owns its buffers and a [`Pattern`]: the
//! extent plus the diagonal range that may hold nonzero values.

use genmat_core::validation::validate_pattern_write;
use genmat_core::{DiagonalRange, Extent, MatrixElement, Result};

/// Extent and diagonal accessors delegating to a `pattern` field
macro_rules! pattern_accessors {
    () => {
        fn rows(&self) -> usize {
            self.pattern.extent().rows
        }

        fn cols(&self) -> usize {
            self.pattern.extent().cols
        }

        fn first_diag(&self) -> isize {
            self.pattern.range().first()
        }

        fn last_diag(&self) -> isize {
            self.pattern.range().last()
        }
    };
}

pub(crate) use pattern_accessors;

pub mod banded;
pub mod compressed;
pub mod coo;
pub mod dense;
pub mod dia;
pub mod scalar;
pub mod skyline;

pub use banded::VectorFormat;
pub use compressed::{Axis, CompressedFormat};
pub use coo::CooFormat;
pub use dense::ArrayFormat;
pub use dia::DiaFormat;
pub use scalar::ScalarFormat;
pub use skyline::{SkylineFormat, SkylineSide};

/// Storable positions of a format instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    extent: Extent,
    range: DiagonalRange,
}

impl Pattern {
    /// Pattern of `extent` restricted to `range`, clipped to the extent
    pub fn new(extent: Extent, range: DiagonalRange) -> Self {
        Self {
            extent,
            range: range.clipped(extent.rows, extent.cols),
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn range(&self) -> DiagonalRange {
        self.range
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.range.contains(row, col)
    }

    /// Number of storable positions
    pub fn len(&self) -> usize {
        self.range.positions(self.extent.rows, self.extent.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a write of `value` must be stored; errors on a nonzero
    /// value outside the pattern
    pub fn admits<T: MatrixElement>(&self, row: usize, col: usize, value: T) -> Result<bool> {
        validate_pattern_write(self.range, row, col, value.is_zero())
    }

    /// Storable positions in row-major order
    pub fn positions(self) -> impl Iterator<Item = (usize, usize)> {
        let Pattern { extent, range } = self;
        (0..extent.rows).flat_map(move |row| {
            range
                .row_span(row, extent.cols)
                .into_iter()
                .flat_map(move |(start, stop)| (start..=stop).map(move |col| (row, col)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_positions() {
        let pattern = Pattern::new(Extent::square(3), DiagonalRange::new(-1, 0));
        let positions: Vec<_> = pattern.positions().collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]);
        assert_eq!(pattern.len(), 5);
    }

    #[test]
    fn test_pattern_admits() {
        let pattern = Pattern::new(Extent::square(3), DiagonalRange::new(0, 0));
        assert_eq!(pattern.admits(1, 1, 2.0), Ok(true));
        assert_eq!(pattern.admits(0, 1, 0.0), Ok(false));
        assert!(pattern.admits(0, 1, 1.0).is_err());
    }
}
