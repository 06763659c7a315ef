//! Sparse iteration cursor
//!
//! Walks the explicitly stored nonzero entries of a storage format with the
//! reset / end / get_next protocol. The cursor is also an [`Iterator`].

use core::iter::Peekable;

use genmat_core::{MatrixElement, StorageFormat};

type Entries<'a, T> = Peekable<Box<dyn Iterator<Item = (usize, usize, T)> + 'a>>;

/// Cursor over the nonzero entries of one matrix
pub struct SparseCursor<'a, T: MatrixElement> {
    storage: &'a dyn StorageFormat<T>,
    entries: Entries<'a, T>,
}

impl<'a, T: MatrixElement> SparseCursor<'a, T> {
    pub fn new(storage: &'a dyn StorageFormat<T>) -> Self {
        Self {
            storage,
            entries: storage.entries().peekable(),
        }
    }

    /// Rewind to the first entry
    pub fn reset(&mut self) {
        self.entries = self.storage.entries().peekable();
    }

    /// Whether every entry has been returned
    pub fn end(&mut self) -> bool {
        self.entries.peek().is_none()
    }

    /// Next `(row, col, value)` entry
    pub fn get_next(&mut self) -> Option<(usize, usize, T)> {
        self.entries.next()
    }
}

impl<T: MatrixElement> Iterator for SparseCursor<'_, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::GrowthPolicy;
    use crate::formats::{Axis, CompressedFormat, Pattern};
    use genmat_core::{DiagonalRange, ElementAccess, Extent};

    #[test]
    fn test_cursor_protocol() {
        let pattern = Pattern::new(Extent::new(3, 3), DiagonalRange::full(3, 3));
        let policy = GrowthPolicy::dynamic(0.5, 0.5, 9, false);
        let mut storage = CompressedFormat::<i64>::new(pattern, Axis::Row, policy).unwrap();
        storage.set_element(2, 1, 4).unwrap();
        storage.set_element(0, 2, 7).unwrap();

        let mut cursor = SparseCursor::new(&storage);
        let mut seen = Vec::new();
        while !cursor.end() {
            seen.push(cursor.get_next().unwrap());
        }
        assert_eq!(seen, vec![(0, 2, 7), (2, 1, 4)]);
        assert!(cursor.get_next().is_none());

        cursor.reset();
        assert!(!cursor.end());
        assert_eq!(cursor.count(), 2);
    }
}
