//! Skyline format
//!
//! Each major line (a row for the lower side, a column for the upper side)
//! stores a contiguous profile ending at the main diagonal and reaching as
//! far out as its outermost nonzero write. `pointers[m]..pointers[m + 1]`
//! delimits the profile of line `m`. A nonzero write beyond the profile
//! prepends the missing slots and shifts every later pointer.

use genmat_core::{ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::container::{Buffer, GrowthPolicy};

/// Half of the matrix a skyline stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkylineSide {
    /// Row profiles, `col <= row`
    Lower,
    /// Column profiles, `row <= col`
    Upper,
}

impl SkylineSide {
    fn split(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            SkylineSide::Lower => (row, col),
            SkylineSide::Upper => (col, row),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkylineFormat<T> {
    pattern: Pattern,
    side: SkylineSide,
    pointers: Buffer<usize>,
    values: Buffer<T>,
}

impl<T: MatrixElement> SkylineFormat<T> {
    pub fn new(pattern: Pattern, side: SkylineSide, policy: GrowthPolicy) -> Result<Self> {
        let order = pattern.extent().rows;
        Ok(Self {
            pattern,
            side,
            pointers: Buffer::filled(order + 1, 0, policy)?,
            values: Buffer::new(policy)?,
        })
    }

    fn lines(&self) -> usize {
        self.pointers.len() - 1
    }

    /// Storage offset of the profile of `major` and its first minor index
    fn profile(&self, major: usize) -> (usize, usize) {
        let pointers = self.pointers.as_slice();
        let len = pointers[major + 1] - pointers[major];
        (pointers[major], major + 1 - len)
    }

    fn position(&self, major: usize, minor: usize) -> Option<usize> {
        let (offset, first) = self.profile(major);
        (minor >= first).then(|| offset + minor - first)
    }
}

impl<T: MatrixElement> ElementAccess<T> for SkylineFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        if !self.pattern.contains(row, col) {
            return Ok(T::zero());
        }
        let (major, minor) = self.side.split(row, col);
        Ok(match self.position(major, minor) {
            Some(position) => self.values.as_slice()[position],
            None => T::zero(),
        })
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.pattern.admits(row, col, value)? {
            return Ok(());
        }
        let (major, minor) = self.side.split(row, col);
        if let Some(position) = self.position(major, minor) {
            self.values.set(position, value);
            return Ok(());
        }
        if value.is_zero() {
            return Ok(());
        }
        let (offset, first) = self.profile(major);
        let grow = first - minor;
        self.values.insert_run(offset, grow, T::zero())?;
        self.values.set(offset, value);
        for line in major + 1..=self.lines() {
            let pointer = self.pointers.as_slice()[line];
            self.pointers.set(line, pointer + grow);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.pointers.fill(0);
        self.values.truncate(0);
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.values.as_slice().iter().filter(|v| !v.is_zero()).count()
    }
}

impl<T: MatrixElement> StorageFormat<T> for SkylineFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new((0..self.lines()).flat_map(move |major| {
            let (offset, first) = self.profile(major);
            (first..=major).filter_map(move |minor| {
                let value = self.values.as_slice()[offset + minor - first];
                let (row, col) = self.side.split(major, minor);
                (!value.is_zero()).then_some((row, col, value))
            })
        }))
    }
}
