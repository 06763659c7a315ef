//! Subscript validation
//!
//! Pure checks used by the bounds-checking decorator and by the
//! compatibility checker.

use crate::error::{MatrixError, Operation};
use crate::layout::Extent;

/// Validate that `(row, col)` lies inside `extent`
pub const fn validate_subscripts(row: usize, col: usize, extent: Extent) -> Result<(), MatrixError> {
    if extent.contains(row, col) {
        Ok(())
    } else {
        Err(MatrixError::Bounds {
            row,
            col,
            rows: extent.rows,
            cols: extent.cols,
        })
    }
}

/// Validate operand extents for an elementwise operation or an assignment
pub const fn validate_same_extent(op: Operation, left: Extent, right: Extent) -> Result<(), MatrixError> {
    if left.rows == right.rows && left.cols == right.cols {
        Ok(())
    } else {
        Err(MatrixError::IncompatibleOperands {
            op,
            left: (left.rows, left.cols),
            right: (right.rows, right.cols),
        })
    }
}

/// Validate operand extents for a product
pub const fn validate_product_extent(left: Extent, right: Extent) -> Result<(), MatrixError> {
    if left.cols == right.rows {
        Ok(())
    } else {
        Err(MatrixError::IncompatibleOperands {
            op: Operation::Multiply,
            left: (left.rows, left.cols),
            right: (right.rows, right.cols),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subscripts() {
        let extent = Extent::new(2, 3);
        assert_eq!(validate_subscripts(1, 2, extent), Ok(()));
        assert_eq!(
            validate_subscripts(2, 0, extent),
            Err(MatrixError::Bounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
    }

    #[test]
    fn test_validate_product_extent() {
        assert!(validate_product_extent(Extent::new(2, 3), Extent::new(3, 2)).is_ok());
        let err = validate_product_extent(Extent::new(2, 3), Extent::new(4, 2)).unwrap_err();
        assert_eq!(
            err,
            MatrixError::IncompatibleOperands {
                op: Operation::Multiply,
                left: (2, 3),
                right: (4, 2)
            }
        );
    }
}
