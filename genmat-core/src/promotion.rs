//! Result configurations of arithmetic expressions
//!
//! Both operand configurations are merged into a [`FeatureRecord`] and the
//! record is run through the resolver again, so the result of an expression
//! obeys exactly the same legality rules as a user-declared matrix type.

use crate::config::ResolvedConfig;
use crate::error::{ConfigError, Operation};
use crate::features::{Density, Dim, Format, Literal, Shape};
use crate::parser::FeatureRecord;
use crate::resolver::resolve;
use crate::spec::DimSpec;
use crate::validation::format::{legal_formats, validate_density};

use Shape::*;

/// Shape of `left * right`
pub const fn product_shape(left: Shape, right: Shape) -> Shape {
    match (left, right) {
        (Zero, _) | (_, Zero) => Zero,
        (Ident, other) | (other, Ident) => other,
        (Scalar, other) | (other, Scalar) => other,
        (Diag, Symm) | (Symm, Diag) => Rect,
        (Diag, other) | (other, Diag) => other,
        (LowerBandTriang, LowerBandTriang) => LowerBandTriang,
        (UpperBandTriang, UpperBandTriang) => UpperBandTriang,
        (BandDiag, BandDiag) => BandDiag,
        (LowerTriang | LowerBandTriang, LowerTriang | LowerBandTriang) => LowerTriang,
        (UpperTriang | UpperBandTriang, UpperTriang | UpperBandTriang) => UpperTriang,
        _ => Rect,
    }
}

/// Shape of `left + right`
pub const fn sum_shape(left: Shape, right: Shape) -> Shape {
    match (left, right) {
        (Ident, Ident) => Scalar,
        (Zero, other) | (other, Zero) => other,
        (Ident, other) | (other, Ident) => other,
        (Scalar, other) | (other, Scalar) => other,
        (Diag, other) | (other, Diag) => other,
        (Symm, Symm) => Symm,
        (BandDiag, BandDiag) => BandDiag,
        (LowerTriang, LowerTriang | LowerBandTriang) | (LowerBandTriang, LowerTriang) => LowerTriang,
        (LowerBandTriang, LowerBandTriang) => LowerBandTriang,
        (UpperTriang, UpperTriang | UpperBandTriang) | (UpperBandTriang, UpperTriang) => UpperTriang,
        (UpperBandTriang, UpperBandTriang) => UpperBandTriang,
        _ => Rect,
    }
}

/// Shape of `left - right`
pub const fn difference_shape(left: Shape, right: Shape) -> Shape {
    match (left, right) {
        (Zero, Ident) => Scalar,
        (Ident, Ident) => Zero,
        _ => sum_shape(left, right),
    }
}

/// Resolved configuration of `left op right`
pub fn result_config(
    op: Operation,
    left: &ResolvedConfig,
    right: &ResolvedConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let shape = match op {
        Operation::Add => sum_shape(left.shape, right.shape),
        Operation::Subtract => difference_shape(left.shape, right.shape),
        Operation::Multiply => product_shape(left.shape, right.shape),
        Operation::Assign => return Ok(left.clone()),
    };
    let density = if left.is_sparse() && right.is_sparse() {
        Density::Sparse
    } else {
        Density::Dense
    };

    let mut record = FeatureRecord {
        element_type: Some(left.element_type.promote(right.element_type)),
        index_type: Some(left.index_type.promote(right.index_type)),
        shape: Some(shape),
        density: Some(density),
        malloc: agree(left.malloc, right.malloc),
        size: Some(left.size.max(right.size)),
        malloc_err_checking: agree(left.malloc_err_checking, right.malloc_err_checking),
        opt_flag: agree(left.opt_flag, right.opt_flag),
        err_flag: agree(left.err_flag, right.err_flag),
        bounds_checking: agree(left.bounds_checking, right.bounds_checking),
        compat_checking: agree(left.compat_checking, right.compat_checking),
        format: result_format(shape, density, left.format, right.format),
        dict_format: agree(left.dict_format, right.dict_format),
        hash_width: Some(left.hash_width.max(right.hash_width)),
        arr_order: agree(left.arr_order, right.arr_order),
        ..FeatureRecord::default()
    };

    if op == Operation::Multiply {
        product_dimensions(&mut record, shape, left, right);
    } else {
        record.ratio = Some(Literal::new((left.ratio.value() + right.ratio.value()) / 2.0));
        record.growing = Some(Literal::new((left.growing.value() + right.growing.value()) / 2.0));
        sum_dimensions(&mut record, op, shape, left, right);
    }

    resolve(&record)
}

fn agree<V: PartialEq>(left: V, right: V) -> Option<V> {
    if left == right {
        Some(left)
    } else {
        None
    }
}

/// A shared format survives when it is still legal for the result
fn result_format(
    shape: Shape,
    density: Density,
    left: Option<Format>,
    right: Option<Format>,
) -> Option<Format> {
    let format = agree(left, right).flatten()?;
    if legal_formats(shape).contains(&format) && validate_density(density, format).is_ok() {
        Some(format)
    } else {
        None
    }
}

/// Diagonal count known at configuration time; diagonal shapes count one
fn static_diags(config: &ResolvedConfig) -> Option<usize> {
    if config.shape.is_diagonal() {
        Some(1)
    } else {
        config.diags.value()
    }
}

fn to_spec<V>(value: Option<V>) -> Option<DimSpec<V>> {
    value.map(DimSpec::fixed)
}

fn sum_dimensions(
    record: &mut FeatureRecord,
    op: Operation,
    shape: Shape,
    left: &ResolvedConfig,
    right: &ResolvedConfig,
) {
    let rows = left.static_rows().or(right.static_rows());
    let cols = left.static_cols().or(right.static_cols());
    if shape == Rect {
        record.rows = to_spec(rows);
        record.cols = to_spec(cols);
    } else {
        record.order = to_spec(rows.or(cols));
    }
    if shape.is_banded() {
        if let (Some(l), Some(r)) = (static_diags(left), static_diags(right)) {
            record.diags = Some(DimSpec::fixed(l.max(r)));
        }
    }
    if shape == Scalar {
        if let (Dim::Static(l), Dim::Static(r)) = (left.scalar_value, right.scalar_value) {
            let value = match op {
                Operation::Subtract => l.value() - r.value(),
                _ => l.value() + r.value(),
            };
            record.scalar_value = Some(DimSpec::fixed(Literal::new(value)));
        }
    }
}

fn product_dimensions(
    record: &mut FeatureRecord,
    shape: Shape,
    left: &ResolvedConfig,
    right: &ResolvedConfig,
) {
    let rows = left.static_rows();
    let cols = right.static_cols();
    if shape == Rect {
        record.rows = to_spec(rows);
        record.cols = to_spec(cols);
    } else if let (Some(rows), Some(cols)) = (rows, cols) {
        if rows == cols {
            record.order = Some(DimSpec::fixed(rows));
        }
    }
    if shape.is_banded() {
        if let (Some(l), Some(r)) = (static_diags(left), static_diags(right)) {
            record.diags = Some(DimSpec::fixed(l + r - 1));
        }
    }
    if shape == Scalar {
        if let (Dim::Static(l), Dim::Static(r)) = (left.scalar_value, right.scalar_value) {
            record.scalar_value = Some(DimSpec::fixed(Literal::new(l.value() * r.value())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ElementType;
    use crate::resolver::resolve_spec;
    use crate::spec::{DensitySpec, FormatSpec, MatrixSpec, ShapeSpec};

    fn config(spec: MatrixSpec) -> ResolvedConfig {
        resolve_spec(&spec).unwrap()
    }

    fn square(shape: Shape) -> MatrixSpec {
        MatrixSpec::new().with_shape(ShapeSpec::new(shape))
    }

    #[test]
    fn test_product_lattice() {
        assert_eq!(product_shape(Zero, Rect), Zero);
        assert_eq!(product_shape(Ident, Symm), Symm);
        assert_eq!(product_shape(Diag, Symm), Rect);
        assert_eq!(product_shape(Diag, LowerBandTriang), LowerBandTriang);
        assert_eq!(product_shape(LowerTriang, LowerBandTriang), LowerTriang);
        assert_eq!(product_shape(LowerTriang, UpperTriang), Rect);
        assert_eq!(product_shape(Symm, Symm), Rect);
    }

    #[test]
    fn test_sum_lattice() {
        assert_eq!(sum_shape(Ident, Ident), Scalar);
        assert_eq!(sum_shape(Ident, Zero), Ident);
        assert_eq!(sum_shape(Diag, UpperTriang), UpperTriang);
        assert_eq!(sum_shape(Symm, Symm), Symm);
        assert_eq!(sum_shape(LowerBandTriang, LowerTriang), LowerTriang);
        assert_eq!(sum_shape(BandDiag, LowerTriang), Rect);
        assert_eq!(difference_shape(Ident, Ident), Zero);
        assert_eq!(difference_shape(Zero, Ident), Scalar);
    }

    #[test]
    fn test_zero_plus_ident_is_ident() {
        let zero = config(square(Zero));
        let ident = config(square(Ident));
        let result = result_config(Operation::Add, &zero, &ident).unwrap();
        assert_eq!(result.shape, Ident);
        assert_eq!(result.format, None);
    }

    #[test]
    fn test_ident_sums_become_scalars() {
        let ident = config(square(Ident));
        let sum = result_config(Operation::Add, &ident, &ident).unwrap();
        assert_eq!(sum.shape, Scalar);
        assert_eq!(sum.scalar_value, Dim::Static(Literal::new(2.0)));

        let zero = config(square(Zero));
        let diff = result_config(Operation::Subtract, &zero, &ident).unwrap();
        assert_eq!(diff.scalar_value, Dim::Static(Literal::new(-1.0)));
    }

    #[test]
    fn test_element_types_promote() {
        let left = config(MatrixSpec::new().with_element_type(ElementType::I64));
        let right = config(MatrixSpec::new().with_element_type(ElementType::F32));
        let result = result_config(Operation::Multiply, &left, &right).unwrap();
        assert_eq!(result.element_type, ElementType::F32);
    }

    #[test]
    fn test_density_and_format_agreement() {
        let csr = config(
            MatrixSpec::new().with_shape(ShapeSpec::new(Rect).with_format(FormatSpec::Csr)),
        );
        let coo = config(
            MatrixSpec::new()
                .with_shape(ShapeSpec::new(Rect).with_format(FormatSpec::coo()))
                .with_density(DensitySpec::sparse()),
        );
        let same = result_config(Operation::Add, &csr, &csr).unwrap();
        assert_eq!(same.format, Some(Format::Csr));
        let mixed = result_config(Operation::Add, &csr, &coo).unwrap();
        assert_eq!(mixed.density, Density::Sparse);
        assert_eq!(mixed.format, Some(Format::Coo));

        let dense = config(MatrixSpec::new());
        let result = result_config(Operation::Add, &csr, &dense).unwrap();
        assert_eq!(result.density, Density::Dense);
        assert_eq!(result.format, Some(Format::Array));
    }

    #[test]
    fn test_vector_products_drop_format() {
        let symm = config(square(Symm));
        assert_eq!(symm.format, Some(Format::Vector));
        let result = result_config(Operation::Multiply, &symm, &symm).unwrap();
        assert_eq!(result.shape, Rect);
        assert_eq!(result.format, Some(Format::Array));
    }

    #[test]
    fn test_static_dimensions() {
        let band = |diags: usize| {
            config(MatrixSpec::new().with_shape(
                ShapeSpec::new(BandDiag)
                    .with_order(DimSpec::fixed(6))
                    .with_diags(DimSpec::fixed(diags)),
            ))
        };
        let product = result_config(Operation::Multiply, &band(3), &band(5)).unwrap();
        assert_eq!(product.order, Dim::Static(6));
        assert_eq!(product.diags, Dim::Static(7));

        let sum = result_config(Operation::Add, &band(3), &band(5)).unwrap();
        assert_eq!(sum.diags, Dim::Static(5));

        let rect = config(MatrixSpec::new().with_shape(
            ShapeSpec::new(Rect)
                .with_rows(DimSpec::fixed(2))
                .with_cols(DimSpec::fixed(3)),
        ));
        let dynamic = config(MatrixSpec::new());
        let product = result_config(Operation::Multiply, &rect, &dynamic).unwrap();
        assert_eq!(product.rows, Dim::Static(2));
        assert_eq!(product.cols, Dim::Dynamic);
    }
}
