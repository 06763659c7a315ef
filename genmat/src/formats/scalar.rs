//! Scalar storage for the scalar, identity and zero shapes
//!
//! A single value repeated along the main diagonal. When the value is fixed
//! by the configuration, writing a different value on the diagonal is a
//! pattern violation.

use genmat_core::{
    DiagonalRange, ElementAccess, Extent, MatrixElement, MatrixError, Result, StorageFormat,
};

use super::{pattern_accessors, Pattern};

#[derive(Debug, Clone)]
pub struct ScalarFormat<T> {
    pattern: Pattern,
    value: T,
    fixed: bool,
}

impl<T: MatrixElement> ScalarFormat<T> {
    /// Scalar matrix whose value may be changed through the diagonal
    pub fn new(order: usize, value: T) -> Self {
        Self {
            pattern: Pattern::new(Extent::square(order), DiagonalRange::new(0, 0)),
            value,
            fixed: false,
        }
    }

    /// Scalar matrix whose value is part of its type
    pub fn fixed(order: usize, value: T) -> Self {
        Self {
            fixed: true,
            ..Self::new(order, value)
        }
    }

    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: MatrixElement> ElementAccess<T> for ScalarFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if row == col {
            Ok(self.value)
        } else {
            Ok(T::zero())
        }
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.pattern.admits(row, col, value)? || value == self.value {
            return Ok(());
        }
        if self.fixed {
            return Err(MatrixError::PatternViolation { row, col });
        }
        self.value = value;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if !self.fixed {
            self.value = T::zero();
        }
        Ok(())
    }

    fn nnz(&self) -> usize {
        if self.value.is_zero() {
            0
        } else {
            self.pattern.len()
        }
    }
}

impl<T: MatrixElement> StorageFormat<T> for ScalarFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        let order = if self.value.is_zero() { 0 } else { self.rows() };
        Box::new((0..order).map(move |i| (i, i, self.value)))
    }
}
