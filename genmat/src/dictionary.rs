//! Sparse dictionaries backing the coordinate format
//!
//! Both variants map `(row, col)` to a value, never hold duplicate keys and
//! never hold a zero: writing zero removes the entry.

use genmat_core::{FnvBuildHasher, MatrixElement, MatrixError, Result};
use hashbrown::HashMap;

use crate::container::{Buffer, GrowthPolicy};

/// Hash map keyed by position
///
/// Hashing is deterministic, so iteration order only depends on the
/// sequence of writes.
#[derive(Debug, Clone)]
pub struct HashDictionary<T> {
    map: HashMap<(usize, usize), T, FnvBuildHasher>,
    limit: Option<usize>,
    checked: bool,
}

impl<T: MatrixElement> HashDictionary<T> {
    /// Create a dictionary with `width` initial buckets
    pub fn new(width: usize, policy: GrowthPolicy) -> Result<Self> {
        let (limit, checked) = match policy {
            GrowthPolicy::Fixed { capacity } => (Some(capacity), true),
            GrowthPolicy::Dynamic { checked, .. } => (None, checked),
        };
        let mut map = HashMap::with_hasher(FnvBuildHasher::default());
        let initial = limit.map_or(width, |limit| width.min(limit));
        map.try_reserve(initial)
            .map_err(|_| MatrixError::Allocation { requested: initial })?;
        Ok(Self {
            map,
            limit,
            checked,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.map.get(&(row, col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if value.is_zero() {
            self.map.remove(&(row, col));
            return Ok(());
        }
        if let Some(slot) = self.map.get_mut(&(row, col)) {
            *slot = value;
            return Ok(());
        }
        let requested = self.map.len() + 1;
        if self.limit.is_some_and(|limit| requested > limit) {
            return Err(MatrixError::Allocation { requested });
        }
        if self.checked {
            self.map
                .try_reserve(1)
                .map_err(|_| MatrixError::Allocation { requested })?;
        }
        self.map.insert((row, col), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.map.iter().map(|(&(row, col), &value)| (row, col, value))
    }
}

/// Flat list searched linearly
#[derive(Debug, Clone)]
pub struct ListDictionary<T> {
    entries: Buffer<(usize, usize, T)>,
}

impl<T: MatrixElement> ListDictionary<T> {
    pub fn new(policy: GrowthPolicy) -> Result<Self> {
        Ok(Self {
            entries: Buffer::new(policy)?,
        })
    }

    fn position(&self, row: usize, col: usize) -> Option<usize> {
        self.entries
            .as_slice()
            .iter()
            .position(|&(r, c, _)| r == row && c == col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.position(row, col)
            .map(|index| self.entries.as_slice()[index].2)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        match (self.position(row, col), value.is_zero()) {
            (Some(index), true) => {
                self.entries.remove(index);
                Ok(())
            }
            (Some(index), false) => {
                self.entries.set(index, (row, col, value));
                Ok(())
            }
            (None, true) => Ok(()),
            (None, false) => self.entries.push((row, col, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.truncate(0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.entries.as_slice().iter().copied()
    }
}

/// Either dictionary variant
#[derive(Debug, Clone)]
pub enum Dictionary<T> {
    Hash(HashDictionary<T>),
    List(ListDictionary<T>),
}

impl<T: MatrixElement> Dictionary<T> {
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        match self {
            Dictionary::Hash(dict) => dict.get(row, col),
            Dictionary::List(dict) => dict.get(row, col),
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        match self {
            Dictionary::Hash(dict) => dict.set(row, col, value),
            Dictionary::List(dict) => dict.set(row, col, value),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dictionary::Hash(dict) => dict.len(),
            Dictionary::List(dict) => dict.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match self {
            Dictionary::Hash(dict) => dict.clear(),
            Dictionary::List(dict) => dict.clear(),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        match self {
            Dictionary::Hash(dict) => Box::new(dict.iter()),
            Dictionary::List(dict) => Box::new(dict.iter()),
        }
    }
}
