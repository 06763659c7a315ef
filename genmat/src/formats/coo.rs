//! Coordinate format over a sparse dictionary

use genmat_core::{ElementAccess, MatrixElement, Result, StorageFormat};

use super::{pattern_accessors, Pattern};
use crate::dictionary::Dictionary;

#[derive(Debug, Clone)]
pub struct CooFormat<T> {
    pattern: Pattern,
    dict: Dictionary<T>,
}

impl<T: MatrixElement> CooFormat<T> {
    pub fn new(pattern: Pattern, dict: Dictionary<T>) -> Self {
        Self { pattern, dict }
    }
}

impl<T: MatrixElement> ElementAccess<T> for CooFormat<T> {
    pattern_accessors!();

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        Ok(self.dict.get(row, col).unwrap_or_else(T::zero))
    }

    fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if self.pattern.admits(row, col, value)? {
            self.dict.set(row, col, value)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.dict.clear();
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.dict.len()
    }
}

impl<T: MatrixElement> StorageFormat<T> for CooFormat<T> {
    fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        self.dict.iter()
    }
}
