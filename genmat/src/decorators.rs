//! Composable element-access decorators
//!
//! The assembler wraps a storage format in zero or more of these. Each one
//! adds a single behaviour and delegates everything else.

use genmat_core::validation::validate_subscripts;
use genmat_core::{ElementAccess, Extent, MatrixElement, Result, StorageFormat};

/// Symmetric view over a format storing the lower half
///
/// Positions above the diagonal are mirrored to `(col, row)` before
/// delegating.
#[derive(Debug, Clone)]
pub struct Symmetric<A> {
    inner: A,
}

impl<A> Symmetric<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

fn mirror(row: usize, col: usize) -> (usize, usize) {
    if row < col {
        (col, row)
    } else {
        (row, col)
    }
}

impl<T: MatrixElement, A: ElementAccess<T>> ElementAccess<T> for Symmetric<A> {
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn first_diag(&self) -> isize {
        self.inner.first_diag()
    }

    fn last_diag(&self) -> isize {
        -self.inner.first_diag()
    }

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        let (row, col) = mirror(row, col);
        self.inner.get_element(row, col)
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let (row, col) = mirror(row, col);
        self.inner.set_element(row, col, value)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn nnz(&self) -> usize {
        self.inner.nnz()
    }
}

impl<T: MatrixElement, A: StorageFormat<T>> StorageFormat<T> for Symmetric<A> {
    /// Entries of the stored lower half
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        self.inner.entries()
    }
}

/// Range-checks subscripts before every access
#[derive(Debug, Clone)]
pub struct BoundsChecked<A> {
    inner: A,
}

impl<A> BoundsChecked<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

fn check<T: MatrixElement, A: ElementAccess<T>>(inner: &A, row: usize, col: usize) -> Result<()> {
    validate_subscripts(row, col, Extent::new(inner.rows(), inner.cols()))
}

impl<T: MatrixElement, A: ElementAccess<T>> ElementAccess<T> for BoundsChecked<A> {
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn first_diag(&self) -> isize {
        self.inner.first_diag()
    }

    fn last_diag(&self) -> isize {
        self.inner.last_diag()
    }

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        check::<T, _>(&self.inner, row, col)?;
        self.inner.get_element(row, col)
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check::<T, _>(&self.inner, row, col)?;
        self.inner.set_element(row, col, value)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn nnz(&self) -> usize {
        self.inner.nnz()
    }
}

impl<T: MatrixElement, A: StorageFormat<T>> StorageFormat<T> for BoundsChecked<A> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        self.inner.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::GrowthPolicy;
    use crate::formats::{Pattern, VectorFormat};
    use genmat_core::{DiagonalRange, MatrixError};

    fn lower(order: usize) -> VectorFormat<f64> {
        let pattern = Pattern::new(Extent::square(order), DiagonalRange::lower(order));
        VectorFormat::new(pattern, GrowthPolicy::Fixed { capacity: 16 }).unwrap()
    }

    #[test]
    fn test_symmetric_mirrors() {
        let mut symm = Symmetric::new(lower(3));
        symm.set_element(0, 2, 4.0).unwrap();
        assert_eq!(symm.get_element(2, 0), Ok(4.0));
        assert_eq!(symm.get_element(0, 2), Ok(4.0));
        assert_eq!((symm.first_diag(), symm.last_diag()), (-2, 2));
        assert_eq!(symm.entries().collect::<Vec<_>>(), vec![(2, 0, 4.0)]);
    }

    #[test]
    fn test_bounds_checked() {
        let mut checked = BoundsChecked::new(Symmetric::new(lower(2)));
        assert_eq!(
            checked.get_element(2, 0),
            Err(MatrixError::Bounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
        assert!(checked.set_element(1, 1, 1.0).is_ok());
    }
}
