//! Owned element buffers
//!
//! Every storage format keeps its data in [`Buffer`]s (one-dimensional) or an
//! [`Array2`] (two-dimensional). A buffer either has a capacity fixed when the
//! matrix type is configured, or grows by a configured increment.

use genmat_core::{ArrOrder, MatrixError, Result};
use log::trace;

/// How a buffer obtains capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Never holds more than `capacity` entries
    Fixed { capacity: usize },
    /// Starts at `initial` slots and grows by at least `increment`
    Dynamic {
        initial: usize,
        increment: usize,
        /// Report refused allocations as errors instead of aborting
        checked: bool,
    },
}

impl GrowthPolicy {
    /// Dynamic policy sized relative to `storable` positions
    pub fn dynamic(ratio: f64, growing: f64, storable: usize, checked: bool) -> Self {
        let scaled = |factor: f64| ((factor * storable as f64).ceil() as usize).max(1);
        GrowthPolicy::Dynamic {
            initial: scaled(ratio),
            increment: scaled(growing),
            checked,
        }
    }

    fn checked(&self) -> bool {
        match self {
            GrowthPolicy::Fixed { .. } => true,
            GrowthPolicy::Dynamic { checked, .. } => *checked,
        }
    }
}

fn reserve_exact<T>(data: &mut Vec<T>, additional: usize, checked: bool) -> Result<()> {
    if checked {
        data.try_reserve_exact(additional)
            .map_err(|_| MatrixError::Allocation {
                requested: data.len().saturating_add(additional),
            })
    } else {
        data.reserve_exact(additional);
        Ok(())
    }
}

/// Contiguous growable buffer
///
/// All mutating operations reserve the capacity they need before touching
/// any element, so a failed growth leaves the buffer unchanged.
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    data: Vec<T>,
    policy: GrowthPolicy,
}

impl<T: Copy> Buffer<T> {
    /// Create an empty buffer holding its initial capacity
    pub fn new(policy: GrowthPolicy) -> Result<Self> {
        let initial = match policy {
            GrowthPolicy::Fixed { capacity } => capacity,
            GrowthPolicy::Dynamic { initial, .. } => initial,
        };
        let mut data = Vec::new();
        reserve_exact(&mut data, initial, policy.checked())?;
        Ok(Self { data, policy })
    }

    /// Create a buffer of `len` copies of `value`
    pub fn filled(len: usize, value: T, policy: GrowthPolicy) -> Result<Self> {
        if let GrowthPolicy::Fixed { capacity } = policy {
            if len > capacity {
                return Err(MatrixError::Allocation { requested: len });
            }
        }
        let mut data = Vec::new();
        reserve_exact(&mut data, len, policy.checked())?;
        data.resize(len, value);
        Ok(Self { data, policy })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of entries the buffer can hold without growing
    pub fn capacity(&self) -> usize {
        match self.policy {
            GrowthPolicy::Fixed { capacity } => capacity,
            GrowthPolicy::Dynamic { .. } => self.data.capacity(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Overwrite an existing entry; `index` must be below `len`
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Make room for `additional` more entries
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(MatrixError::Allocation {
                requested: usize::MAX,
            })?;
        match self.policy {
            GrowthPolicy::Fixed { capacity } => {
                if required > capacity {
                    return Err(MatrixError::Allocation {
                        requested: required,
                    });
                }
                if required > self.data.capacity() {
                    reserve_exact(&mut self.data, additional, true)?;
                }
                Ok(())
            }
            GrowthPolicy::Dynamic {
                increment, checked, ..
            } => {
                let current = self.data.capacity();
                if required <= current {
                    return Ok(());
                }
                let target = current + increment.max(required - current);
                let additional = target - self.data.len();
                reserve_exact(&mut self.data, additional, checked)?;
                trace!("buffer grown from {current} to {target} slots");
                Ok(())
            }
        }
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        self.reserve(1)?;
        self.data.push(value);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.reserve(1)?;
        self.data.insert(index, value);
        Ok(())
    }

    /// Insert `count` copies of `value` before `index`
    pub fn insert_run(&mut self, index: usize, count: usize, value: T) -> Result<()> {
        self.reserve(count)?;
        self.data
            .splice(index..index, core::iter::repeat(value).take(count));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> T {
        self.data.remove(index)
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

/// Dense two-dimensional array in row- or column-major order
#[derive(Debug, Clone)]
pub struct Array2<T> {
    data: Buffer<T>,
    rows: usize,
    cols: usize,
    order: ArrOrder,
}

impl<T: Copy> Array2<T> {
    /// Create a `rows x cols` array of `value`
    ///
    /// Under a fixed policy the array models a `capacity x capacity` block,
    /// so neither dimension may exceed `capacity`.
    pub fn new(rows: usize, cols: usize, order: ArrOrder, value: T, policy: GrowthPolicy) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or(MatrixError::Allocation {
            requested: usize::MAX,
        })?;
        let policy = match policy {
            GrowthPolicy::Fixed { capacity } => {
                if rows > capacity || cols > capacity {
                    return Err(MatrixError::Allocation {
                        requested: rows.max(cols),
                    });
                }
                GrowthPolicy::Fixed { capacity: len }
            }
            dynamic => dynamic,
        };
        Ok(Self {
            data: Buffer::filled(len, value, policy)?,
            rows,
            cols,
            order,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        match self.order {
            ArrOrder::RowMajor => row * self.cols + col,
            ArrOrder::ColumnMajor => col * self.rows + row,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data.as_slice()[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let index = self.index(row, col);
        self.data.set(index, value);
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}
