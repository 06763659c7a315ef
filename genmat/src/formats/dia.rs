//! Diagonal (DIA) format
//!
//! One dense column per storable diagonal: position `(i, j)` lives at row
//! `i`, column `(j - i) - first` of a `rows x diags` array.

use genmat_core::{ArrOrder, ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::container::{Array2, GrowthPolicy};

#[derive(Debug, Clone)]
pub struct DiaFormat<T> {
    pattern: Pattern,
    diagonals: Array2<T>,
}

impl<T: MatrixElement> DiaFormat<T> {
    pub fn new(pattern: Pattern, policy: GrowthPolicy) -> Result<Self> {
        let rows = pattern.extent().rows;
        let diags = pattern.range().diags();
        Ok(Self {
            pattern,
            diagonals: Array2::new(rows, diags, ArrOrder::ColumnMajor, T::zero(), policy)?,
        })
    }

    fn column(&self, row: usize, col: usize) -> usize {
        (col as isize - row as isize - self.pattern.range().first()) as usize
    }
}

impl<T: MatrixElement> ElementAccess<T> for DiaFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if self.pattern.contains(row, col) {
            Ok(self.diagonals.get(row, self.column(row, col)))
        } else {
            Ok(T::zero())
        }
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if self.pattern.admits(row, col, value)? {
            let column = self.column(row, col);
            self.diagonals.set(row, column, value);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.diagonals.fill(T::zero());
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.entries().count()
    }
}

impl<T: MatrixElement> StorageFormat<T> for DiaFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(self.pattern.positions().filter_map(move |(row, col)| {
            let value = self.diagonals.get(row, self.column(row, col));
            (!value.is_zero()).then_some((row, col, value))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{DiagonalRange, Extent, MatrixError};

    #[test]
    fn test_tridiagonal() {
        let pattern = Pattern::new(Extent::square(4), DiagonalRange::centered(3));
        let mut dia = DiaFormat::new(pattern, GrowthPolicy::Fixed { capacity: 4 }).unwrap();
        dia.set_element(0, 1, 2u32).unwrap();
        dia.set_element(3, 2, 5).unwrap();
        dia.set_element(3, 3, 6).unwrap();
        assert_eq!(dia.get_element(0, 1), Ok(2));
        assert_eq!(dia.get_element(3, 2), Ok(5));
        assert_eq!(dia.get_element(3, 0), Ok(0));
        assert_eq!(
            dia.set_element(0, 3, 1),
            Err(MatrixError::PatternViolation { row: 0, col: 3 })
        );
        assert_eq!(
            dia.entries().collect::<Vec<_>>(),
            vec![(0, 1, 2), (3, 2, 5), (3, 3, 6)]
        );
    }
}
