//! Fully resolved matrix configuration

use crate::features::{
    ArrOrder, Density, DictFormat, Dim, ElementType, ErrFlag, Format, Literal, Malloc, OptFlag,
    Shape,
};

/// Concrete choice for every configurable aspect of a matrix type
///
/// Produced by [`resolve`](crate::resolve) and never partially filled. One
/// config describes a matrix *type*; all instances of that type share it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedConfig {
    pub element_type: ElementType,
    pub index_type: ElementType,
    pub shape: Shape,
    pub density: Density,
    /// Initial capacity of dynamic buffers, as a fraction of storable positions
    pub ratio: Literal,
    /// Growth increment of dynamic buffers, as a fraction of storable positions
    pub growing: Literal,
    pub malloc: Malloc,
    /// Capacity of fixed buffers
    pub size: usize,
    pub malloc_err_checking: bool,
    pub opt_flag: OptFlag,
    pub err_flag: ErrFlag,
    pub bounds_checking: bool,
    pub compat_checking: bool,
    /// `None` for the diagonal shapes, which use implicit storage
    pub format: Option<Format>,
    pub dict_format: DictFormat,
    pub hash_width: usize,
    pub arr_order: ArrOrder,
    pub rows: Dim<usize>,
    pub cols: Dim<usize>,
    pub order: Dim<usize>,
    pub diags: Dim<usize>,
    pub scalar_value: Dim<Literal>,
}

impl ResolvedConfig {
    /// Statically known row count (from rows or order)
    pub fn static_rows(&self) -> Option<usize> {
        self.rows.value().or(self.order.value())
    }

    /// Statically known column count (from cols or order)
    pub fn static_cols(&self) -> Option<usize> {
        self.cols.value().or(self.order.value())
    }

    pub fn is_sparse(&self) -> bool {
        self.density == Density::Sparse
    }
}

impl core::fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}<{}> {} ", self.shape, self.element_type, self.density)?;
        match self.format {
            Some(format) => write!(f, "{format}"),
            None => write!(f, "implicit"),
        }
    }
}
