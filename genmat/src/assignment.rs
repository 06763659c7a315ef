//! Assignment dispatcher
//!
//! Copies an expression into existing storage. The copy loop is chosen from
//! [`ASSIGN_RULES`] by the source's shape and density alone; the first
//! matching rule wins.

use genmat_core::{Density, MatrixElement, MatrixExpr, Result, Shape, StorageFormat};
use log::trace;

use crate::assembler::ShapeSet;

/// Copy loop used by an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignStrategy {
    /// Nothing to read, the destination is cleared
    Zero,
    /// Only the main diagonal is read
    Diag,
    /// Every position is read
    Rect,
    /// Rows are read within the source's diagonal range
    Band,
    /// Only nonzero entries are visited
    Sparse,
    /// Nonzero entries are visited and mirrored across the diagonal
    SparseSymm,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignRule {
    pub shapes: ShapeSet,
    /// `None` matches either density
    pub density: Option<Density>,
    pub strategy: AssignStrategy,
}

const fn rule(shapes: ShapeSet, density: Option<Density>, strategy: AssignStrategy) -> AssignRule {
    AssignRule {
        shapes,
        density,
        strategy,
    }
}

pub const ASSIGN_RULES: &[AssignRule] = &[
    rule(ShapeSet(&[Shape::Zero]), None, AssignStrategy::Zero),
    rule(
        ShapeSet(&[Shape::Ident, Shape::Scalar, Shape::Diag]),
        None,
        AssignStrategy::Diag,
    ),
    rule(ShapeSet(&[Shape::Symm]), Some(Density::Sparse), AssignStrategy::SparseSymm),
    rule(ShapeSet::ANY, Some(Density::Sparse), AssignStrategy::Sparse),
    rule(ShapeSet(&[Shape::Rect]), None, AssignStrategy::Rect),
    rule(ShapeSet::ANY, None, AssignStrategy::Band),
];

impl AssignStrategy {
    pub fn select(shape: Shape, density: Density) -> Self {
        ASSIGN_RULES
            .iter()
            .find(|rule| {
                rule.shapes.contains(shape) && rule.density.map_or(true, |d| d == density)
            })
            .map_or(AssignStrategy::Band, |rule| rule.strategy)
    }
}

/// Copy `source` into `dest`
///
/// Positions the source does not visit end up zero. Only positions inside
/// both extents are written.
pub fn assign<T, E>(dest: &mut dyn StorageFormat<T>, source: &E) -> Result<()>
where
    T: MatrixElement,
    E: MatrixExpr<Element = T> + ?Sized,
{
    let config = source.config();
    let strategy = AssignStrategy::select(config.shape, config.density);
    let rows = dest.rows().min(source.rows());
    let cols = dest.cols().min(source.cols());
    trace!("assigning {config} with {strategy:?} strategy");

    match strategy {
        AssignStrategy::Zero => dest.clear(),
        AssignStrategy::Diag => {
            dest.clear()?;
            for i in 0..rows.min(cols) {
                dest.set_element(i, i, source.get_element(i, i)?)?;
            }
            Ok(())
        }
        AssignStrategy::Rect => {
            for row in 0..rows {
                for col in 0..cols {
                    dest.set_element(row, col, source.get_element(row, col)?)?;
                }
            }
            Ok(())
        }
        AssignStrategy::Band => {
            dest.clear()?;
            let range = source.diagonal_range();
            for row in 0..rows {
                let Some((start, stop)) = range.row_span(row, cols) else {
                    continue;
                };
                for col in start..=stop {
                    dest.set_element(row, col, source.get_element(row, col)?)?;
                }
            }
            Ok(())
        }
        AssignStrategy::Sparse => {
            dest.clear()?;
            source.visit_nonzeros(&mut |row, col, value| {
                if row < rows && col < cols {
                    dest.set_element(row, col, value)?;
                }
                Ok(())
            })
        }
        AssignStrategy::SparseSymm => {
            dest.clear()?;
            source.visit_nonzeros(&mut |row, col, value| {
                if row < rows && col < cols {
                    dest.set_element(row, col, value)?;
                }
                if col < rows && row < cols {
                    dest.set_element(col, row, value)?;
                }
                Ok(())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Matrix, MatrixArgs, MatrixType};
    use genmat_core::{DensitySpec, ErrorCategory, FormatSpec, MatrixSpec, ShapeSpec};

    fn matrix<T: MatrixElement>(spec: MatrixSpec, args: MatrixArgs<T>) -> Matrix<T> {
        MatrixType::<T>::from_spec(&spec).unwrap().create(args).unwrap()
    }

    fn shape(shape: Shape) -> MatrixSpec {
        MatrixSpec::new().with_shape(ShapeSpec::new(shape))
    }

    #[test]
    fn test_strategy_selection() {
        use AssignStrategy::*;
        assert_eq!(AssignStrategy::select(Shape::Zero, Density::Sparse), Zero);
        assert_eq!(AssignStrategy::select(Shape::Scalar, Density::Dense), Diag);
        assert_eq!(AssignStrategy::select(Shape::Symm, Density::Sparse), SparseSymm);
        assert_eq!(AssignStrategy::select(Shape::Symm, Density::Dense), Band);
        assert_eq!(AssignStrategy::select(Shape::Rect, Density::Sparse), Sparse);
        assert_eq!(AssignStrategy::select(Shape::Rect, Density::Dense), Rect);
        assert_eq!(AssignStrategy::select(Shape::BandDiag, Density::Dense), Band);
    }

    #[test]
    fn test_sparse_symmetric_source_is_mirrored() {
        let spec = shape(Shape::Symm).with_density(DensitySpec::sparse());
        let mut symm = matrix::<f64>(spec, MatrixArgs::new().with_order(3));
        symm.set_element(2, 0, 5.0).unwrap();
        symm.set_element(1, 1, 1.0).unwrap();
        assert_eq!(symm.nnz(), 2);

        let mut rect = matrix::<f64>(shape(Shape::Rect), MatrixArgs::new().with_rows(3).with_cols(3));
        rect.assign(&symm).unwrap();
        assert_eq!(rect.get_element(2, 0), Ok(5.0));
        assert_eq!(rect.get_element(0, 2), Ok(5.0));
        assert_eq!(rect.get_element(1, 1), Ok(1.0));
        assert_eq!(rect.nnz(), 3);
    }

    #[test]
    fn test_band_assignment_clears_destination() {
        let mut dest = matrix(shape(Shape::Rect), MatrixArgs::new().with_rows(3).with_cols(3).with_value(7));
        let band = matrix(shape(Shape::BandDiag), MatrixArgs::new().with_order(3).with_diags(1).with_value(2));
        dest.assign(&band).unwrap();
        assert_eq!(dest.get_element(1, 1), Ok(2));
        assert_eq!(dest.get_element(0, 1), Ok(0));
        assert_eq!(dest.nnz(), 3);
    }

    #[test]
    fn test_assignment_respects_destination_pattern() {
        let spec = MatrixSpec::new()
            .with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::Csr))
            .with_density(DensitySpec::sparse());
        let mut source = matrix::<i32>(spec, MatrixArgs::new().with_rows(2).with_cols(2));
        source.set_element(0, 1, 3).unwrap();
        let mut lower = matrix::<i32>(shape(Shape::LowerTriang), MatrixArgs::new().with_order(2));
        let err = lower.assign(&source).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PatternViolation);

        let mut wide = matrix::<i32>(shape(Shape::Rect), MatrixArgs::new().with_rows(2).with_cols(3));
        let err = wide.assign(&source).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::IncompatibleOperands);
    }
}
