//! Memoised operand reads for products
//!
//! A product reads each operand element once per output element that needs
//! it. When an operand is itself an expression every read would recompute
//! it, so non-leaf operands are read through an [`ElementCache`] that keeps
//! the first value computed for each position.

use core::cell::{Cell, RefCell};

use genmat_core::{FnvBuildHasher, MatrixExpr, Result};
use hashbrown::HashMap;

/// Cache owned by a product node for one operand
pub struct ElementCache<'a, E: MatrixExpr> {
    expr: &'a E,
    values: RefCell<HashMap<(usize, usize), E::Element, FnvBuildHasher>>,
    misses: Cell<usize>,
}

impl<'a, E: MatrixExpr> ElementCache<'a, E> {
    pub fn new(expr: &'a E) -> Self {
        Self {
            expr,
            values: RefCell::new(HashMap::default()),
            misses: Cell::new(0),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<E::Element> {
        if let Some(value) = self.values.borrow().get(&(row, col)) {
            return Ok(*value);
        }
        let value = self.expr.get_element(row, col)?;
        self.misses.set(self.misses.get() + 1);
        self.values.borrow_mut().insert((row, col), value);
        Ok(value)
    }

    /// Number of reads that reached the expression
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

/// A product operand, read directly or through a cache
pub enum Operand<'a, E: MatrixExpr> {
    Leaf(&'a E),
    Cached(ElementCache<'a, E>),
}

impl<'a, E: MatrixExpr> Operand<'a, E> {
    /// Leaves are read directly; expressions get a cache
    pub fn new(expr: &'a E) -> Self {
        if expr.is_leaf() {
            Operand::Leaf(expr)
        } else {
            Operand::Cached(ElementCache::new(expr))
        }
    }

    pub fn expr(&self) -> &'a E {
        match self {
            Operand::Leaf(expr) => *expr,
            Operand::Cached(cache) => cache.expr,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<E::Element> {
        match self {
            Operand::Leaf(expr) => expr.get_element(row, col),
            Operand::Cached(cache) => cache.get(row, col),
        }
    }

    pub fn cache(&self) -> Option<&ElementCache<'a, E>> {
        match self {
            Operand::Leaf(_) => None,
            Operand::Cached(cache) => Some(cache),
        }
    }
}
