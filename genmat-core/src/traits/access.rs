//! Element access interfaces
//!
//! [`ElementAccess`] is the capability set every storage format and every
//! decorator provides. [`MatrixExpr`] is the read-only view shared by stored
//! matrices and lazy expression nodes.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::layout::DiagonalRange;
use crate::traits::element::MatrixElement;

/// Uniform element access over one physical storage layout
pub trait ElementAccess<T: MatrixElement> {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Lowest diagonal offset that may hold a nonzero
    fn first_diag(&self) -> isize;

    /// Highest diagonal offset that may hold a nonzero
    fn last_diag(&self) -> isize;

    fn diagonal_range(&self) -> DiagonalRange {
        DiagonalRange::new(self.first_diag(), self.last_diag())
    }

    /// Logical value at `(row, col)`; zero outside the storable pattern
    fn get_element(&self, row: usize, col: usize) -> Result<T>;

    /// Store `value` at `(row, col)`
    ///
    /// Writing zero outside the storable pattern is a no-op. Writing a
    /// nonzero value there fails with a pattern violation.
    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()>;

    /// Reset every element to zero
    fn clear(&mut self) -> Result<()>;

    /// Number of physically stored entries
    fn nnz(&self) -> usize;
}

/// A storage format that can enumerate its stored entries
#[cfg(feature = "alloc")]
pub trait StorageFormat<T: MatrixElement>: ElementAccess<T> {
    /// Every stored nonzero entry, each exactly once
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_>;
}

#[cfg(feature = "alloc")]
impl<T: MatrixElement, A: ElementAccess<T> + ?Sized> ElementAccess<T> for Box<A> {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn first_diag(&self) -> isize {
        (**self).first_diag()
    }

    fn last_diag(&self) -> isize {
        (**self).last_diag()
    }

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        (**self).get_element(row, col)
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        (**self).set_element(row, col, value)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn nnz(&self) -> usize {
        (**self).nnz()
    }
}

#[cfg(feature = "alloc")]
impl<T: MatrixElement, A: StorageFormat<T> + ?Sized> StorageFormat<T> for Box<A> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        (**self).entries()
    }
}

/// Read-only matrix expression
///
/// Implemented by stored matrices (leaves) and by lazy arithmetic nodes.
pub trait MatrixExpr {
    type Element: MatrixElement;

    /// Configuration of the matrix type this expression evaluates to
    fn config(&self) -> &ResolvedConfig;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn first_diag(&self) -> isize;

    fn last_diag(&self) -> isize;

    fn diagonal_range(&self) -> DiagonalRange {
        DiagonalRange::new(self.first_diag(), self.last_diag())
    }

    fn get_element(&self, row: usize, col: usize) -> Result<Self::Element>;

    /// Whether this expression reads directly from storage
    fn is_leaf(&self) -> bool {
        false
    }

    /// Call `visit` for every nonzero element
    ///
    /// The default scans the diagonal range row by row.
    fn visit_nonzeros(
        &self,
        visit: &mut dyn FnMut(usize, usize, Self::Element) -> Result<()>,
    ) -> Result<()> {
        let range = self.diagonal_range();
        for row in 0..self.rows() {
            let Some((start, stop)) = range.row_span(row, self.cols()) else {
                continue;
            };
            for col in start..=stop {
                let value = self.get_element(row, col)?;
                if !value.is_zero() {
                    visit(row, col, value)?;
                }
            }
        }
        Ok(())
    }
}
