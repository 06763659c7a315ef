//! Compressed sparse row and column formats
//!
//! Values and their minor indices are stored major by major; `pointers[m]`
//! is the offset of the first entry of major line `m`, and `pointers[m + 1]`
//! ends it. Minor indices are kept sorted within a line so lookups are a
//! binary search. Inserting or removing an entry shifts every later value
//! and adjusts every later pointer.

use core::ops::Range;

use genmat_core::{ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::container::{Buffer, GrowthPolicy};

/// Which index selects the compressed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Compressed sparse row
    Row,
    /// Compressed sparse column
    Column,
}

impl Axis {
    /// `(major, minor)` of a position
    fn split(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Axis::Row => (row, col),
            Axis::Column => (col, row),
        }
    }

    /// `(row, col)` of a major/minor pair
    fn join(self, major: usize, minor: usize) -> (usize, usize) {
        self.split(major, minor)
    }
}

#[derive(Debug, Clone)]
pub struct CompressedFormat<T> {
    pattern: Pattern,
    axis: Axis,
    pointers: Buffer<usize>,
    indices: Buffer<usize>,
    values: Buffer<T>,
}

impl<T: MatrixElement> CompressedFormat<T> {
    pub fn new(pattern: Pattern, axis: Axis, policy: GrowthPolicy) -> Result<Self> {
        let extent = pattern.extent();
        let majors = match axis {
            Axis::Row => extent.rows,
            Axis::Column => extent.cols,
        };
        Ok(Self {
            pattern,
            axis,
            pointers: Buffer::filled(majors + 1, 0, policy)?,
            indices: Buffer::new(policy)?,
            values: Buffer::new(policy)?,
        })
    }

    fn majors(&self) -> usize {
        self.pointers.len() - 1
    }

    fn span(&self, major: usize) -> Range<usize> {
        let pointers = self.pointers.as_slice();
        pointers[major]..pointers[major + 1]
    }

    /// Position of `minor` in line `major`, or where it would be inserted
    fn find(&self, major: usize, minor: usize) -> core::result::Result<usize, usize> {
        let span = self.span(major);
        let start = span.start;
        self.indices.as_slice()[span]
            .binary_search(&minor)
            .map(|offset| start + offset)
            .map_err(|offset| start + offset)
    }

    fn shift_pointers(&mut self, major: usize, grow: bool) {
        for line in major + 1..=self.majors() {
            let pointer = self.pointers.as_slice()[line];
            self.pointers
                .set(line, if grow { pointer + 1 } else { pointer - 1 });
        }
    }
}

impl<T: MatrixElement> ElementAccess<T> for CompressedFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if !self.pattern.contains(row, col) {
            return Ok(T::zero());
        }
        let (major, minor) = self.axis.split(row, col);
        Ok(match self.find(major, minor) {
            Ok(position) => self.values.as_slice()[position],
            Err(_) => T::zero(),
        })
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.pattern.admits(row, col, value)? {
            return Ok(());
        }
        let (major, minor) = self.axis.split(row, col);
        match (self.find(major, minor), value.is_zero()) {
            (Ok(position), true) => {
                self.indices.remove(position);
                self.values.remove(position);
                self.shift_pointers(major, false);
            }
            (Ok(position), false) => self.values.set(position, value),
            (Err(_), true) => {}
            (Err(position), false) => {
                self.indices.reserve(1)?;
                self.values.reserve(1)?;
                self.indices.insert(position, minor)?;
                self.values.insert(position, value)?;
                self.shift_pointers(major, true);
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.pointers.fill(0);
        self.indices.truncate(0);
        self.values.truncate(0);
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl<T: MatrixElement> StorageFormat<T> for CompressedFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new((0..self.majors()).flat_map(move |major| {
            self.span(major).map(move |position| {
                let (row, col) = self.axis.join(major, self.indices.as_slice()[position]);
                (row, col, self.values.as_slice()[position])
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{DiagonalRange, Extent, MatrixError};

    fn format(axis: Axis, policy: GrowthPolicy) -> CompressedFormat<f64> {
        let extent = Extent::new(3, 4);
        let pattern = Pattern::new(extent, DiagonalRange::full(extent.rows, extent.cols));
        CompressedFormat::new(pattern, axis, policy).unwrap()
    }

    const POLICY: GrowthPolicy = GrowthPolicy::Dynamic {
        initial: 1,
        increment: 2,
        checked: true,
    };

    #[test]
    fn test_row_insertion_keeps_order() {
        let mut csr = format(Axis::Row, POLICY);
        csr.set_element(1, 3, 4.0).unwrap();
        csr.set_element(0, 2, 2.0).unwrap();
        csr.set_element(1, 0, 3.0).unwrap();
        csr.set_element(0, 0, 1.0).unwrap();
        assert_eq!(csr.pointers.as_slice(), &[0, 2, 4, 4]);
        assert_eq!(
            csr.entries().collect::<Vec<_>>(),
            vec![(0, 0, 1.0), (0, 2, 2.0), (1, 0, 3.0), (1, 3, 4.0)]
        );
    }

    #[test]
    fn test_column_removal() {
        let mut csc = format(Axis::Column, POLICY);
        csc.set_element(2, 1, 5.0).unwrap();
        csc.set_element(0, 1, 6.0).unwrap();
        csc.set_element(0, 3, 7.0).unwrap();
        csc.set_element(2, 1, 0.0).unwrap();
        assert_eq!(csc.get_element(2, 1), Ok(0.0));
        assert_eq!(csc.get_element(0, 1), Ok(6.0));
        assert_eq!(csc.nnz(), 2);
        assert_eq!(csc.entries().collect::<Vec<_>>(), vec![(0, 1, 6.0), (0, 3, 7.0)]);
    }

    #[test]
    fn test_failed_insert_leaves_format_unchanged() {
        let mut csr = format(Axis::Row, GrowthPolicy::Fixed { capacity: 4 });
        csr.set_element(0, 0, 1.0).unwrap();
        csr.set_element(1, 1, 2.0).unwrap();
        csr.set_element(2, 2, 3.0).unwrap();
        csr.set_element(2, 3, 4.0).unwrap();
        assert_eq!(
            csr.set_element(0, 1, 9.0),
            Err(MatrixError::Allocation { requested: 5 })
        );
        assert_eq!(csr.pointers.as_slice(), &[0, 1, 2, 4]);
        assert_eq!(csr.nnz(), 4);
    }
}
