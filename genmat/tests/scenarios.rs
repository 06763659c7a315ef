//! End-to-end scenarios for generated matrix types

use genmat::{
    ConfigError, DensitySpec, DimSpec, ErrorCategory, Evaluate, FormatSpec, Matrix, MatrixArgs,
    MatrixError, MatrixGenerator, MatrixSpec, Shape, ShapeSpec,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create<T: genmat::MatrixElement>(spec: MatrixSpec, args: MatrixArgs<T>) -> Matrix<T> {
    MatrixGenerator::new()
        .generate::<T>(&spec)
        .and_then(|ty| ty.create(args))
        .unwrap()
}

#[test]
fn zero_plus_identity_is_identity() {
    init_logging();
    let zero = create::<f64>(
        MatrixSpec::new().with_shape(ShapeSpec::new(Shape::Zero)),
        MatrixArgs::new().with_order(3),
    );
    let ident = create::<f64>(
        MatrixSpec::new().with_shape(ShapeSpec::new(Shape::Ident)),
        MatrixArgs::new().with_order(3),
    );
    let sum = (&zero + &ident).unwrap().evaluate().unwrap();
    assert_eq!(sum.config().shape, Shape::Ident);
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_eq!(sum.get_element(i, j), Ok(expected));
        }
    }
}

#[test]
fn product_with_mismatched_inner_dimension_is_rejected() {
    init_logging();
    let rect = MatrixSpec::new().with_shape(ShapeSpec::new(Shape::Rect));
    let a = create::<f64>(rect, MatrixArgs::new().with_rows(2).with_cols(3));
    let b = create::<f64>(rect, MatrixArgs::new().with_rows(4).with_cols(2));
    let err = (&a * &b).err().unwrap();
    assert_eq!(err.category(), ErrorCategory::IncompatibleOperands);
}

#[test]
fn csr_drops_entries_set_to_zero() {
    init_logging();
    let spec = MatrixSpec::new()
        .with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::Csr))
        .with_density(DensitySpec::sparse());
    let mut csr = create::<f64>(spec, MatrixArgs::new().with_rows(3).with_cols(3));
    csr.set_element(0, 0, 5.0).unwrap();
    csr.set_element(0, 2, 7.0).unwrap();
    csr.set_element(0, 0, 0.0).unwrap();

    let mut cursor = csr.cursor();
    assert!(!cursor.end());
    assert_eq!(cursor.get_next(), Some((0, 2, 7.0)));
    assert!(cursor.end());
    cursor.reset();
    assert_eq!(cursor.count(), 1);
    assert_eq!(csr.nnz(), 1);
}

#[test]
fn write_outside_band_is_a_pattern_violation() {
    init_logging();
    let spec = MatrixSpec::new().with_shape(ShapeSpec::new(Shape::BandDiag));
    let mut band = create::<f64>(spec, MatrixArgs::new().with_order(4).with_diags(3));
    assert_eq!((band.first_diag(), band.last_diag()), (-1, 1));
    assert_eq!(
        band.set_element(0, 2, 9.0),
        Err(MatrixError::PatternViolation { row: 0, col: 2 })
    );
    assert_eq!(band.set_element(0, 2, 0.0), Ok(()));
    assert_eq!(band.get_element(0, 2), Ok(0.0));
}

#[test]
fn sparse_array_is_a_configuration_error() {
    init_logging();
    let spec = MatrixSpec::new()
        .with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::array()))
        .with_density(DensitySpec::sparse());
    let err = MatrixGenerator::new().generate::<f64>(&spec).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(matches!(
        err,
        MatrixError::Configuration(ConfigError::DensityFormatMismatch { .. })
    ));
}

#[test]
fn every_format_round_trips_inside_its_pattern() {
    init_logging();
    let cases = [
        (Shape::Rect, FormatSpec::array(), DensitySpec::Dense),
        (Shape::Rect, FormatSpec::Csr, DensitySpec::sparse()),
        (Shape::Rect, FormatSpec::Csc, DensitySpec::sparse()),
        (Shape::Rect, FormatSpec::coo(), DensitySpec::sparse()),
        (Shape::LowerTriang, FormatSpec::Vector, DensitySpec::Dense),
        (Shape::LowerTriang, FormatSpec::Dia, DensitySpec::sparse()),
        (Shape::UpperTriang, FormatSpec::Sky, DensitySpec::sparse()),
        (Shape::Symm, FormatSpec::Sky, DensitySpec::sparse()),
        (Shape::BandDiag, FormatSpec::Dia, DensitySpec::sparse()),
        (Shape::LowerBandTriang, FormatSpec::Sky, DensitySpec::sparse()),
        (Shape::UpperBandTriang, FormatSpec::Vector, DensitySpec::Dense),
    ];
    for (shape, format, density) in cases {
        let spec = MatrixSpec::new()
            .with_shape(ShapeSpec::new(shape).with_format(format))
            .with_density(density);
        let mut matrix = create::<i64>(spec, MatrixArgs::new().with_order(5).with_rows(5).with_cols(5).with_diags(3));
        let range = matrix.diagonal_range();
        for i in 0..5 {
            for j in 0..5 {
                let value = (10 * i + j) as i64 + 1;
                if range.contains(i, j) {
                    matrix.set_element(i, j, value).unwrap();
                    assert_eq!(matrix.get_element(i, j), Ok(value), "{shape} at ({i}, {j})");
                } else {
                    let err = matrix.set_element(i, j, value).unwrap_err();
                    assert_eq!(err.category(), ErrorCategory::PatternViolation, "{shape} at ({i}, {j})");
                    assert_eq!(matrix.get_element(i, j), Ok(0));
                }
            }
        }
        matrix.clear().unwrap();
        assert_eq!(matrix.nnz(), 0, "{shape}");
    }
}

#[test]
fn static_dimensions_fix_the_extent() {
    init_logging();
    let spec = MatrixSpec::new().with_shape(
        ShapeSpec::new(Shape::Symm)
            .with_format(FormatSpec::Vector)
            .with_order(DimSpec::fixed(3)),
    );
    let mut symm = create::<f32>(spec, MatrixArgs::new());
    assert_eq!((symm.rows(), symm.cols()), (3, 3));
    symm.set_element(0, 2, 4.0).unwrap();
    assert_eq!(symm.get_element(2, 0), Ok(4.0));
    assert_eq!(symm.get_element(3, 0).unwrap_err().category(), ErrorCategory::Bounds);
}
