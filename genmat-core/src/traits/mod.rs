//! Abstract interfaces
//!
//! Element constraints and the access capability set shared by storage
//! formats, decorators, matrices and expression nodes.

pub mod access;
pub mod element;

#[cfg(feature = "alloc")]
pub use access::StorageFormat;
pub use access::{ElementAccess, MatrixExpr};
pub use element::{MatrixElement, Promote};
