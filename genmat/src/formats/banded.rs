//! Banded vector format
//!
//! One slot per storable position, numbered diagonal by diagonal from the
//! lowest diagonal of the pattern. The start of diagonal `d` is the total
//! length of the diagonals below it, computed in closed form, and position
//! `(i, j)` sits `min(i, j)` slots into its diagonal. Triangular and banded
//! patterns therefore waste no slots.

use genmat_core::{ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::container::{Buffer, GrowthPolicy};

#[derive(Debug, Clone)]
pub struct VectorFormat<T> {
    pattern: Pattern,
    values: Buffer<T>,
}

impl<T: MatrixElement> VectorFormat<T> {
    pub fn new(pattern: Pattern, policy: GrowthPolicy) -> Result<Self> {
        Ok(Self {
            pattern,
            values: Buffer::filled(pattern.len(), T::zero(), policy)?,
        })
    }

    fn slot(&self, row: usize, col: usize) -> usize {
        let extent = self.pattern.extent();
        let diag = col as isize - row as isize;
        self.pattern.range().offset_of(diag, extent.rows, extent.cols) + row.min(col)
    }
}

impl<T: MatrixElement> ElementAccess<T> for VectorFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if self.pattern.contains(row, col) {
            Ok(self.values.as_slice()[self.slot(row, col)])
        } else {
            Ok(T::zero())
        }
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if self.pattern.admits(row, col, value)? {
            let slot = self.slot(row, col);
            self.values.set(slot, value);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.fill(T::zero());
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.values.as_slice().iter().filter(|v| !v.is_zero()).count()
    }
}

impl<T: MatrixElement> StorageFormat<T> for VectorFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(self.pattern.positions().filter_map(move |(row, col)| {
            let value = self.values.as_slice()[self.slot(row, col)];
            (!value.is_zero()).then_some((row, col, value))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{DiagonalRange, Extent, MatrixError};

    const POLICY: GrowthPolicy = GrowthPolicy::Dynamic {
        initial: 1,
        increment: 1,
        checked: true,
    };

    #[test]
    fn test_slots_are_a_bijection() {
        for (rows, cols, first, last) in [(4, 4, -1, 1), (3, 5, -2, 4), (5, 3, -4, 0), (4, 4, 0, 3)] {
            let pattern = Pattern::new(Extent::new(rows, cols), DiagonalRange::new(first, last));
            let format = VectorFormat::<f64>::new(pattern, POLICY).unwrap();
            let mut slots: Vec<_> = pattern.positions().map(|(r, c)| format.slot(r, c)).collect();
            slots.sort_unstable();
            assert_eq!(slots, (0..pattern.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_band_round_trip() {
        let pattern = Pattern::new(Extent::square(4), DiagonalRange::new(-1, 1));
        let mut format = VectorFormat::new(pattern, POLICY).unwrap();
        for (row, col) in pattern.positions() {
            format.set_element(row, col, (10 * row + col) as i64).unwrap();
        }
        for (row, col) in pattern.positions() {
            assert_eq!(format.get_element(row, col), Ok((10 * row + col) as i64));
        }
        assert_eq!(format.get_element(0, 3), Ok(0));
        assert_eq!(
            format.set_element(0, 2, 9),
            Err(MatrixError::PatternViolation { row: 0, col: 2 })
        );
    }

    #[test]
    fn test_single_diagonal() {
        let pattern = Pattern::new(Extent::square(3), DiagonalRange::new(0, 0));
        let mut format = VectorFormat::new(pattern, POLICY).unwrap();
        format.set_element(2, 2, 1.5f32).unwrap();
        assert_eq!(format.nnz(), 1);
        assert_eq!(format.entries().collect::<Vec<_>>(), vec![(2, 2, 1.5)]);
    }
}
