//! Matrix types and instances
//!
//! A [`MatrixType`] pairs a resolved configuration with its assembly and
//! creates [`Matrix`] instances. The [`MatrixGenerator`] memoises types
//! per distinct configuration.

use core::marker::PhantomData;
use std::sync::Arc;

use genmat_core::{
    resolve_spec, ConfigError, DiagonalRange, Extent, FnvBuildHasher, MatrixElement, MatrixExpr,
    MatrixSpec, Operation, ResolvedConfig, Result, StorageFormat,
};
use hashbrown::HashMap;
use log::debug;

use crate::assembler::Assembly;
use crate::assignment;
use crate::cursor::SparseCursor;

/// Instance arguments
///
/// Dimensions fixed by the configuration may be omitted; when given they
/// must agree with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixArgs<T> {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub order: Option<usize>,
    pub diags: Option<usize>,
    /// Initial value of every storable position; zero when absent
    pub value: Option<T>,
}

impl<T> Default for MatrixArgs<T> {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            order: None,
            diags: None,
            value: None,
        }
    }
}

impl<T> MatrixArgs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Rows and cols of a square matrix
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_diags(mut self, diags: usize) -> Self {
        self.diags = Some(diags);
        self
    }

    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }
}

/// A configured matrix type with element type `T`
#[derive(Debug)]
pub struct MatrixType<T> {
    config: Arc<ResolvedConfig>,
    assembly: Arc<Assembly>,
    _element: PhantomData<T>,
}

impl<T> Clone for MatrixType<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            assembly: Arc::clone(&self.assembly),
            _element: PhantomData,
        }
    }
}

/// Fill in the element type from `T` and resolve
fn resolve_for<T: MatrixElement>(spec: &MatrixSpec) -> Result<ResolvedConfig> {
    let mut spec = *spec;
    spec.element_type = spec.element_type.or(Some(T::element_type()));
    Ok(resolve_spec(&spec)?)
}

fn check_element_type<T: MatrixElement>(config: &ResolvedConfig) -> Result<()> {
    if config.element_type == T::element_type() {
        Ok(())
    } else {
        Err(ConfigError::ElementTypeMismatch.into())
    }
}

impl<T: MatrixElement> MatrixType<T> {
    /// Resolve and assemble a specification
    ///
    /// An unspecified element type is taken from `T`; a specified one must
    /// match it.
    pub fn from_spec(spec: &MatrixSpec) -> Result<Self> {
        Self::from_config(resolve_for::<T>(spec)?)
    }

    /// Assemble an already resolved configuration
    pub fn from_config(config: ResolvedConfig) -> Result<Self> {
        check_element_type::<T>(&config)?;
        let assembly = Assembly::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            assembly: Arc::new(assembly),
            _element: PhantomData,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    /// Create an instance
    pub fn create(&self, args: MatrixArgs<T>) -> Result<Matrix<T>> {
        let extent = self.assembly.extent.extent(args.rows, args.cols, args.order)?;
        let range = self.assembly.diagonals.range(extent, args.diags)?;
        let init = args.value.unwrap_or_else(T::zero);
        let storage = self.assembly.build(extent, range, init)?;
        debug!(
            "created {}x{} {} with diagonals {}..={}",
            extent.rows,
            extent.cols,
            self.config,
            storage.first_diag(),
            storage.last_diag()
        );
        Ok(Matrix {
            config: Arc::clone(&self.config),
            assembly: Arc::clone(&self.assembly),
            storage,
        })
    }
}

/// Memoising factory for matrix types
#[derive(Debug, Default)]
pub struct MatrixGenerator {
    types: HashMap<ResolvedConfig, (Arc<ResolvedConfig>, Arc<Assembly>), FnvBuildHasher>,
}

impl MatrixGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `spec` and return the matrix type, sharing the configuration
    /// and assembly of an identical configuration
    pub fn generate<T: MatrixElement>(&mut self, spec: &MatrixSpec) -> Result<MatrixType<T>> {
        self.type_for_config(resolve_for::<T>(spec)?)
    }

    pub fn type_for_config<T: MatrixElement>(&mut self, config: ResolvedConfig) -> Result<MatrixType<T>> {
        check_element_type::<T>(&config)?;
        let (config, assembly) = match self.types.get(&config) {
            Some((config, assembly)) => (Arc::clone(config), Arc::clone(assembly)),
            None => {
                let assembly = Arc::new(Assembly::new(&config)?);
                let shared = Arc::new(config.clone());
                self.types.insert(config, (Arc::clone(&shared), Arc::clone(&assembly)));
                (shared, assembly)
            }
        };
        Ok(MatrixType {
            config,
            assembly,
            _element: PhantomData,
        })
    }

    /// Number of distinct matrix types built so far
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A matrix instance
pub struct Matrix<T: MatrixElement> {
    config: Arc<ResolvedConfig>,
    assembly: Arc<Assembly>,
    storage: Box<dyn StorageFormat<T>>,
}

impl<T: MatrixElement> core::fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matrix")
            .field("config", &self.config)
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("nnz", &self.nnz())
            .finish()
    }
}

impl<T: MatrixElement> Matrix<T> {
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn rows(&self) -> usize {
        self.storage.rows()
    }

    pub fn cols(&self) -> usize {
        self.storage.cols()
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.rows(), self.cols())
    }

    /// Number of diagonals that may hold a nonzero
    pub fn diags(&self) -> usize {
        self.diagonal_range().diags()
    }

    pub fn first_diag(&self) -> isize {
        self.storage.first_diag()
    }

    pub fn last_diag(&self) -> isize {
        self.storage.last_diag()
    }

    pub fn diagonal_range(&self) -> DiagonalRange {
        self.storage.diagonal_range()
    }

    pub fn get_element(&self, row: usize, col: usize) -> Result<T> {
        self.storage.get_element(row, col)
    }

    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.storage.set_element(row, col, value)
    }

    /// Number of stored nonzero entries
    pub fn nnz(&self) -> usize {
        self.storage.nnz()
    }

    /// Reset every element to zero
    pub fn clear(&mut self) -> Result<()> {
        self.storage.clear()
    }

    /// Set elements from a row-major list, stopping at the shorter of the
    /// list and the extent
    pub fn fill_row_major(&mut self, values: &[T]) -> Result<()> {
        let cols = self.cols();
        for (index, &value) in values.iter().enumerate().take(self.rows() * cols) {
            self.set_element(index / cols, index % cols, value)?;
        }
        Ok(())
    }

    /// Set elements from a column-major list
    pub fn fill_col_major(&mut self, values: &[T]) -> Result<()> {
        let rows = self.rows();
        for (index, &value) in values.iter().enumerate().take(rows * self.cols()) {
            self.set_element(index % rows, index / rows, value)?;
        }
        Ok(())
    }

    /// Set elements from `(row, col, value)` triples
    pub fn fill_triples(&mut self, triples: &[(usize, usize, T)]) -> Result<()> {
        for &(row, col, value) in triples {
            self.set_element(row, col, value)?;
        }
        Ok(())
    }

    /// Iterator over the stored nonzero entries
    pub fn cursor(&self) -> SparseCursor<'_, T> {
        SparseCursor::new(self.storage.as_ref())
    }

    /// Copy the elements of `source` into this matrix
    pub fn assign<E>(&mut self, source: &E) -> Result<()>
    where
        E: MatrixExpr<Element = T> + ?Sized,
    {
        self.assembly
            .compat
            .check_same(Operation::Assign, self.extent(), Extent::new(source.rows(), source.cols()))?;
        assignment::assign(self.storage.as_mut(), source)
    }
}

impl<T: MatrixElement> MatrixExpr for Matrix<T> {
    type Element = T;

    fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    fn rows(&self) -> usize {
        self.storage.rows()
    }

    fn cols(&self) -> usize {
        self.storage.cols()
    }

    fn first_diag(&self) -> isize {
        self.storage.first_diag()
    }

    fn last_diag(&self) -> isize {
        self.storage.last_diag()
    }

    fn get_element(&self, row: usize, col: usize) -> Result<T> {
        self.storage.get_element(row, col)
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn visit_nonzeros(&self, visit: &mut dyn FnMut(usize, usize, T) -> Result<()>) -> Result<()> {
        for (row, col, value) in self.storage.entries() {
            visit(row, col, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{
        DensitySpec, DimSpec, ElementType, ErrorCategory, FormatSpec, MallocSpec, Shape, ShapeSpec,
    };

    #[test]
    fn test_element_type_from_rust_type() {
        let ty = MatrixType::<f32>::from_spec(&MatrixSpec::new()).unwrap();
        assert_eq!(ty.config().element_type, ElementType::F32);

        let spec = MatrixSpec::new().with_element_type(ElementType::I64);
        let err = MatrixType::<f32>::from_spec(&spec).unwrap_err();
        assert_eq!(err, ConfigError::ElementTypeMismatch.into());
    }

    #[test]
    fn test_generator_memoises_assemblies() {
        let mut generator = MatrixGenerator::new();
        let spec = MatrixSpec::new().with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::Csc));
        let first = generator.generate::<f64>(&spec).unwrap();
        let second = generator.generate::<f64>(&spec).unwrap();
        assert!(Arc::ptr_eq(&first.assembly, &second.assembly));
        assert!(Arc::ptr_eq(&first.config, &second.config));
        let a = first.create(MatrixArgs::new().with_rows(2).with_cols(2)).unwrap();
        let b = second.create(MatrixArgs::new().with_rows(3).with_cols(1)).unwrap();
        assert!(Arc::ptr_eq(&a.config, &b.config));
        generator.generate::<f64>(&MatrixSpec::new()).unwrap();
        assert_eq!(generator.len(), 2);
    }

    #[test]
    fn test_create_with_initial_value() {
        let spec = MatrixSpec::new().with_shape(ShapeSpec::new(Shape::UpperBandTriang));
        let ty = MatrixType::<i32>::from_spec(&spec).unwrap();
        let matrix = ty
            .create(MatrixArgs::new().with_order(4).with_diags(2).with_value(3))
            .unwrap();
        assert_eq!((matrix.first_diag(), matrix.last_diag()), (0, 1));
        assert_eq!(matrix.diags(), 2);
        assert_eq!(matrix.get_element(2, 3), Ok(3));
        assert_eq!(matrix.get_element(2, 1), Ok(0));
        assert_eq!(matrix.nnz(), 7);
    }

    #[test]
    fn test_static_extent() {
        let spec = MatrixSpec::new().with_shape(
            ShapeSpec::new(Shape::Rect)
                .with_rows(DimSpec::fixed(2))
                .with_cols(DimSpec::fixed(3)),
        );
        let ty = MatrixType::<f64>::from_spec(&spec).unwrap();
        let matrix = ty.create(MatrixArgs::new()).unwrap();
        assert_eq!(matrix.extent(), Extent::new(2, 3));
        let err = ty.create(MatrixArgs::new().with_rows(4)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_literal_initialisation() {
        let ty = MatrixType::<i32>::from_spec(&MatrixSpec::new()).unwrap();
        let mut matrix = ty.create(MatrixArgs::new().with_rows(2).with_cols(3)).unwrap();
        matrix.fill_row_major(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(matrix.get_element(1, 0), Ok(4));
        matrix.fill_col_major(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(matrix.get_element(1, 0), Ok(2));
        assert_eq!(matrix.get_element(0, 2), Ok(5));

        let spec = MatrixSpec::new().with_shape(ShapeSpec::new(Shape::LowerTriang));
        let mut lower = MatrixType::<i32>::from_spec(&spec)
            .unwrap()
            .create(MatrixArgs::new().with_order(2))
            .unwrap();
        lower.fill_triples(&[(1, 0, 7), (0, 1, 0)]).unwrap();
        assert_eq!(lower.cursor().collect::<Vec<_>>(), vec![(1, 0, 7)]);
        let err = lower.fill_row_major(&[1, 2]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PatternViolation);
    }

    #[test]
    fn test_fixed_allocation_exhaustion() {
        let spec = MatrixSpec::new()
            .with_shape(ShapeSpec::new(Shape::Rect).with_format(FormatSpec::coo()))
            .with_density(DensitySpec::sparse())
            .with_malloc(MallocSpec::Fixed { size: Some(2) });
        let ty = MatrixType::<f64>::from_spec(&spec).unwrap();
        let mut matrix = ty.create(MatrixArgs::new().with_rows(3).with_cols(3)).unwrap();
        matrix.set_element(0, 0, 1.0).unwrap();
        matrix.set_element(1, 1, 1.0).unwrap();
        let err = matrix.set_element(2, 2, 1.0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Allocation);
    }
}
