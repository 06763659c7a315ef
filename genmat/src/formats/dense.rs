//! Dense array format

use genmat_core::{ArrOrder, ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::container::{Array2, GrowthPolicy};

/// Full two-dimensional buffer; positions outside the pattern stay zero
#[derive(Debug, Clone)]
pub struct ArrayFormat<T> {
    pattern: Pattern,
    array: Array2<T>,
}

impl<T: MatrixElement> ArrayFormat<T> {
    pub fn new(pattern: Pattern, order: ArrOrder, policy: GrowthPolicy) -> Result<Self> {
        let extent = pattern.extent();
        Ok(Self {
            pattern,
            array: Array2::new(extent.rows, extent.cols, order, T::zero(), policy)?,
        })
    }
}

impl<T: MatrixElement> ElementAccess<T> for ArrayFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if self.pattern.contains(row, col) {
            Ok(self.array.get(row, col))
        } else {
            Ok(T::zero())
        }
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if self.pattern.admits(row, col, value)? {
            self.array.set(row, col, value);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.array.fill(T::zero());
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.entries().count()
    }
}

impl<T: MatrixElement> StorageFormat<T> for ArrayFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(self.pattern.positions().filter_map(move |(row, col)| {
            let value = self.array.get(row, col);
            (!value.is_zero()).then_some((row, col, value))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{DiagonalRange, ErrorCategory, Extent};

    const POLICY: GrowthPolicy = GrowthPolicy::Fixed { capacity: 4 };

    #[test]
    fn test_lower_triangular_array() {
        let pattern = Pattern::new(Extent::square(3), DiagonalRange::lower(3));
        let mut format = ArrayFormat::<f64>::new(pattern, ArrOrder::ColumnMajor, POLICY).unwrap();
        format.set_element(2, 0, 4.0).unwrap();
        format.set_element(0, 2, 0.0).unwrap();
        assert_eq!(format.get_element(2, 0), Ok(4.0));
        assert_eq!(format.get_element(0, 2), Ok(0.0));
        let err = format.set_element(0, 2, 1.0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PatternViolation);
        assert_eq!(format.nnz(), 1);
    }

    #[test]
    fn test_clear() {
        let pattern = Pattern::new(Extent::new(2, 4), DiagonalRange::full(2, 4));
        let mut format = ArrayFormat::<i32>::new(pattern, ArrOrder::RowMajor, POLICY).unwrap();
        format.set_element(1, 3, 9).unwrap();
        format.clear().unwrap();
        assert_eq!(format.entries().count(), 0);
    }
}
