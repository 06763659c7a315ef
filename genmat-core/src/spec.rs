//! Declarative matrix feature specification
//!
//! A [`MatrixSpec`] is a nested, possibly incomplete description of a matrix
//! type. Anything left as `None` is "unspecified" and gets filled in by the
//! resolver. Specs are plain values assembled with `with_*` builders:
//!
//! ```
//! use genmat_core::{DensitySpec, FormatSpec, MatrixSpec, Shape, ShapeSpec};
//!
//! let spec = MatrixSpec::new()
//!     .with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::Csr))
//!     .with_density(DensitySpec::sparse());
//! assert!(spec.structure.is_some());
//! ```

use crate::features::{ArrOrder, ElementType, ErrFlag, Literal, OptFlag, Shape};

/// Static-or-dynamic declaration as written in a specification
///
/// Unlike the resolved [`Dim`](crate::Dim), a static declaration may omit
/// its number; the resolver rejects that.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DimSpec<V> {
    Static(Option<V>),
    Dynamic,
}

impl<V> DimSpec<V> {
    /// Static declaration with a value
    pub fn fixed(value: V) -> Self {
        DimSpec::Static(Some(value))
    }
}

/// Dictionary choice for the coordinate format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DictSpec {
    Hash { width: Option<usize> },
    List,
}

/// Storage format with its format-specific sub-features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatSpec {
    Array { order: Option<ArrOrder> },
    Vector,
    Csr,
    Csc,
    Coo { dict: Option<DictSpec> },
    Dia,
    Sky,
}

impl FormatSpec {
    /// Array format with unspecified ordering
    pub const fn array() -> Self {
        FormatSpec::Array { order: None }
    }

    /// Coordinate format with unspecified dictionary
    pub const fn coo() -> Self {
        FormatSpec::Coo { dict: None }
    }
}

/// Shape with the sub-features that parameterise it
///
/// Only the fields meaningful for `kind` are read: rows and cols for `Rect`,
/// order for every square shape, diags for the band shapes and value for
/// `Scalar`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeSpec {
    pub kind: Shape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rows: Option<DimSpec<usize>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cols: Option<DimSpec<usize>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: Option<DimSpec<usize>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub diags: Option<DimSpec<usize>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<DimSpec<Literal>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub format: Option<FormatSpec>,
}

impl ShapeSpec {
    pub const fn new(kind: Shape) -> Self {
        Self {
            kind,
            rows: None,
            cols: None,
            order: None,
            diags: None,
            value: None,
            format: None,
        }
    }

    pub fn with_rows(mut self, rows: DimSpec<usize>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_cols(mut self, cols: DimSpec<usize>) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn with_order(mut self, order: DimSpec<usize>) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_diags(mut self, diags: DimSpec<usize>) -> Self {
        self.diags = Some(diags);
        self
    }

    pub fn with_value(mut self, value: DimSpec<Literal>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_format(mut self, format: FormatSpec) -> Self {
        self.format = Some(format);
        self
    }
}

/// Density with its growth parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DensitySpec {
    Dense,
    Sparse {
        ratio: Option<Literal>,
        growing: Option<Literal>,
    },
}

impl DensitySpec {
    /// Sparse density with default growth parameters
    pub const fn sparse() -> Self {
        DensitySpec::Sparse {
            ratio: None,
            growing: None,
        }
    }
}

/// Allocation strategy with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MallocSpec {
    Fixed { size: Option<usize> },
    Dynamic { check_errors: Option<bool> },
}

/// Shape, density and allocation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StructureSpec {
    pub shape: Option<ShapeSpec>,
    pub density: Option<DensitySpec>,
    pub malloc: Option<MallocSpec>,
}

/// Root of a matrix feature specification
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixSpec {
    pub element_type: Option<ElementType>,
    pub index_type: Option<ElementType>,
    pub structure: Option<StructureSpec>,
    pub opt_flag: Option<OptFlag>,
    pub err_flag: Option<ErrFlag>,
    pub bounds_checking: Option<bool>,
    pub compat_checking: Option<bool>,
}

impl MatrixSpec {
    /// Fully unspecified description
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn with_index_type(mut self, index_type: ElementType) -> Self {
        self.index_type = Some(index_type);
        self
    }

    pub fn with_shape(mut self, shape: ShapeSpec) -> Self {
        self.structure.get_or_insert_with(StructureSpec::default).shape = Some(shape);
        self
    }

    pub fn with_density(mut self, density: DensitySpec) -> Self {
        self.structure.get_or_insert_with(StructureSpec::default).density = Some(density);
        self
    }

    pub fn with_malloc(mut self, malloc: MallocSpec) -> Self {
        self.structure.get_or_insert_with(StructureSpec::default).malloc = Some(malloc);
        self
    }

    pub fn with_opt_flag(mut self, opt_flag: OptFlag) -> Self {
        self.opt_flag = Some(opt_flag);
        self
    }

    pub fn with_err_flag(mut self, err_flag: ErrFlag) -> Self {
        self.err_flag = Some(err_flag);
        self
    }

    pub fn with_bounds_checking(mut self, enabled: bool) -> Self {
        self.bounds_checking = Some(enabled);
        self
    }

    pub fn with_compat_checking(mut self, enabled: bool) -> Self {
        self.compat_checking = Some(enabled);
        self
    }
}
