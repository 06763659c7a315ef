//! genmat - generated matrix types with lazy arithmetic
//!
//! A matrix type is described declaratively by a [`MatrixSpec`], resolved
//! into a [`ResolvedConfig`] and assembled into storage, decorators and
//! checking policies. Instances support element access, sparse iteration and
//! lazy `+ - *` expressions that are materialised by assignment.
//!
//! ## Architecture
//!
//! - **genmat-core**: feature model, defaults resolution, type promotion,
//!   element traits and validation (no allocation required)
//! - **genmat**: storage formats, the component assembler, matrix instances,
//!   lazy expression nodes and the assignment dispatcher
//!
//! ## Quick Start
//!
//! ```rust
//! use genmat::{Evaluate, MatrixArgs, MatrixGenerator, MatrixSpec, Shape, ShapeSpec};
//!
//! fn example() -> genmat::Result<()> {
//!     let mut generator = MatrixGenerator::new();
//!     let band = generator.generate::<f64>(
//!         &MatrixSpec::new().with_shape(ShapeSpec::new(Shape::BandDiag)),
//!     )?;
//!     let a = band.create(MatrixArgs::new().with_order(4).with_diags(3).with_value(1.0))?;
//!
//!     let product = (&a * &a)?.evaluate()?;
//!     assert_eq!(product.get_element(1, 1)?, 3.0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Storage formats**: dense array, banded vector, CSR, CSC, COO, DIA,
//!   skyline and implicit scalar storage
//! - **Decorators**: symmetric storage and bounds checking
//! - **Lazy arithmetic**: shape-dispatched kernels with memoised product
//!   operands
//! - **Allocation policies**: fixed capacity or ratio-driven growth

// Re-export the feature model and core abstractions
pub use genmat_core::{
    // Specification and configuration
    resolve, resolve_spec, ArrOrder, Density, DensitySpec, DictFormat, DictSpec, Dim, DimSpec,
    ElementType, ErrFlag, Format, FormatSpec, Literal, Malloc, MallocSpec, MatrixSpec, OptFlag,
    ResolvedConfig, Shape, ShapeSpec, StructureSpec,
    // Core traits
    ElementAccess, MatrixElement, MatrixExpr, Promote, StorageFormat,
    // Layout
    DiagonalRange, Extent,
    // Error handling
    ConfigError, ErrorCategory, MatrixError, Operation, Result,
};

// Implementation modules
pub mod assembler;
pub mod assignment;
pub mod checkers;
pub mod container;
pub mod cursor;
pub mod decorators;
pub mod dictionary;
pub mod formats;
pub mod lazy;
pub mod matrix;

// Public exports
pub use assembler::{Assembly, StorageKind};
pub use assignment::AssignStrategy;
pub use cursor::SparseCursor;
pub use lazy::{add, evaluate, mul, sub, ElementwiseNode, Evaluate, ProductNode};
pub use matrix::{Matrix, MatrixArgs, MatrixGenerator, MatrixType};
