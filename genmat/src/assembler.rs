//! Component assembler
//!
//! Maps a [`ResolvedConfig`] onto the components of a matrix type: how the
//! extent and diagonal range of an instance are determined, which storage
//! format holds the elements, which decorators wrap it and which policies
//! apply. Assembly is a pure function of the configuration.
//!
//! Storage selection is table driven: [`STORAGE_RULES`] is scanned in order
//! and the first rule matching the configuration wins.

use genmat_core::{
    ArrOrder, ConfigError, Density, DiagonalRange, DictFormat, Dim, DimensionKind, Extent, Format,
    MatrixElement, ResolvedConfig, Result, Shape, StorageFormat,
};
use log::trace;

use crate::checkers::{AllocationPolicy, CompatChecker};
use crate::decorators::{BoundsChecked, Symmetric};
use crate::dictionary::{Dictionary, HashDictionary, ListDictionary};
use crate::formats::{
    ArrayFormat, Axis, CompressedFormat, CooFormat, DiaFormat, Pattern, ScalarFormat,
    SkylineFormat, SkylineSide, VectorFormat,
};

/// Set of shapes matched by a dispatch rule
#[derive(Debug, Clone, Copy)]
pub struct ShapeSet(pub &'static [Shape]);

impl ShapeSet {
    pub const ANY: ShapeSet = ShapeSet(&Shape::ALL);

    pub fn contains(&self, shape: Shape) -> bool {
        self.0.contains(&shape)
    }
}

/// How an instance's extent is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentStrategy {
    DynExt,
    DynRowsStatCols(usize),
    StatRowsDynCols(usize),
    StatExt(usize, usize),
    DynSquare,
    StatSquare(usize),
}

fn positive(value: usize, kind: DimensionKind) -> core::result::Result<usize, ConfigError> {
    if value == 0 {
        Err(ConfigError::NonPositiveDimension(kind))
    } else {
        Ok(value)
    }
}

/// Static value checked against an optional argument
fn fixed(expected: usize, found: Option<usize>, kind: DimensionKind) -> core::result::Result<usize, ConfigError> {
    match found {
        Some(found) if found != expected => Err(ConfigError::StaticDimensionMismatch {
            kind,
            expected,
            found,
        }),
        _ => Ok(expected),
    }
}

fn required(found: Option<usize>, kind: DimensionKind) -> core::result::Result<usize, ConfigError> {
    positive(found.ok_or(ConfigError::DimensionNotSpecified(kind))?, kind)
}

impl ExtentStrategy {
    pub fn select(config: &ResolvedConfig) -> Self {
        if config.shape.is_square() {
            return match config.order {
                Dim::Static(order) => ExtentStrategy::StatSquare(order),
                Dim::Dynamic => ExtentStrategy::DynSquare,
            };
        }
        match (config.rows, config.cols) {
            (Dim::Dynamic, Dim::Dynamic) => ExtentStrategy::DynExt,
            (Dim::Dynamic, Dim::Static(cols)) => ExtentStrategy::DynRowsStatCols(cols),
            (Dim::Static(rows), Dim::Dynamic) => ExtentStrategy::StatRowsDynCols(rows),
            (Dim::Static(rows), Dim::Static(cols)) => ExtentStrategy::StatExt(rows, cols),
        }
    }

    /// Extent of an instance from its arguments
    ///
    /// `order` stands in for both rows and cols when they are not given.
    pub fn extent(
        &self,
        rows: Option<usize>,
        cols: Option<usize>,
        order: Option<usize>,
    ) -> core::result::Result<Extent, ConfigError> {
        use DimensionKind::{Cols, Order, Rows};

        let rows = rows.or(order);
        let cols = cols.or(order);
        match *self {
            ExtentStrategy::DynExt => Ok(Extent::new(required(rows, Rows)?, required(cols, Cols)?)),
            ExtentStrategy::DynRowsStatCols(c) => {
                Ok(Extent::new(required(rows, Rows)?, fixed(c, cols, Cols)?))
            }
            ExtentStrategy::StatRowsDynCols(r) => {
                Ok(Extent::new(fixed(r, rows, Rows)?, required(cols, Cols)?))
            }
            ExtentStrategy::StatExt(r, c) => Ok(Extent::new(fixed(r, rows, Rows)?, fixed(c, cols, Cols)?)),
            ExtentStrategy::DynSquare | ExtentStrategy::StatSquare(_) => {
                if let (Some(rows), Some(cols)) = (rows, cols) {
                    if rows != cols {
                        return Err(ConfigError::NonSquareExtent { rows, cols });
                    }
                }
                let given = rows.or(cols);
                let order = match *self {
                    ExtentStrategy::StatSquare(n) => fixed(n, given, Order)?,
                    _ => required(given, Order)?,
                };
                Ok(Extent::square(positive(order, Order)?))
            }
        }
    }
}

/// How an instance's diagonal range is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalStrategy {
    /// Every diagonal
    Rect,
    /// Main diagonal and below
    TriangLo,
    /// Main diagonal and above
    TriangUp,
    /// Centred band, count from the instance (rounded up to odd)
    DynBand,
    /// Lower band of instance-given count
    DynLo,
    /// Upper band of instance-given count
    DynUp,
    /// Centred band of a configured count
    StatBand(usize),
    /// Configured first and last diagonal
    StatDiags(isize, isize),
}

impl DiagonalStrategy {
    pub fn select(config: &ResolvedConfig) -> Self {
        match (config.shape, config.diags) {
            (Shape::Rect, _) => DiagonalStrategy::Rect,
            (Shape::Diag | Shape::Scalar | Shape::Ident | Shape::Zero, _) => {
                DiagonalStrategy::StatBand(1)
            }
            (Shape::LowerTriang | Shape::Symm, _) => DiagonalStrategy::TriangLo,
            (Shape::UpperTriang, _) => DiagonalStrategy::TriangUp,
            (Shape::BandDiag, Dim::Static(diags)) => DiagonalStrategy::StatBand(diags),
            (Shape::BandDiag, Dim::Dynamic) => DiagonalStrategy::DynBand,
            (Shape::LowerBandTriang, Dim::Static(diags)) => {
                DiagonalStrategy::StatDiags(1 - diags as isize, 0)
            }
            (Shape::LowerBandTriang, Dim::Dynamic) => DiagonalStrategy::DynLo,
            (Shape::UpperBandTriang, Dim::Static(diags)) => {
                DiagonalStrategy::StatDiags(0, diags as isize - 1)
            }
            (Shape::UpperBandTriang, Dim::Dynamic) => DiagonalStrategy::DynUp,
        }
    }

    /// Diagonal range of an instance, before clipping to its extent
    pub fn range(&self, extent: Extent, diags: Option<usize>) -> core::result::Result<DiagonalRange, ConfigError> {
        let kind = DimensionKind::Diags;
        Ok(match *self {
            DiagonalStrategy::Rect => DiagonalRange::full(extent.rows, extent.cols),
            DiagonalStrategy::TriangLo => DiagonalRange::lower(extent.rows),
            DiagonalStrategy::TriangUp => DiagonalRange::upper(extent.cols),
            DiagonalStrategy::DynBand => {
                let count = required(diags, kind)?;
                DiagonalRange::centered(2 * (count / 2) + 1)
            }
            DiagonalStrategy::DynLo => DiagonalRange::new(1 - required(diags, kind)? as isize, 0),
            DiagonalStrategy::DynUp => DiagonalRange::new(0, required(diags, kind)? as isize - 1),
            DiagonalStrategy::StatBand(count) => DiagonalRange::centered(fixed(count, diags, kind)?),
            DiagonalStrategy::StatDiags(first, last) => {
                fixed((last - first + 1) as usize, diags, kind)?;
                DiagonalRange::new(first, last)
            }
        })
    }
}

/// Physical storage chosen for a matrix type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Array,
    Vector,
    Scalar,
    Csr,
    Csc,
    Coo,
    Dia,
    SkyLower,
    SkyUpper,
}

/// One row of the storage dispatch table
#[derive(Debug, Clone, Copy)]
pub struct StorageRule {
    pub shapes: ShapeSet,
    /// `None` matches either density
    pub density: Option<Density>,
    /// Matched exactly; `None` is implicit storage
    pub format: Option<Format>,
    pub storage: StorageKind,
}

impl StorageRule {
    pub fn matches(&self, config: &ResolvedConfig) -> bool {
        self.shapes.contains(config.shape)
            && self.density.map_or(true, |density| density == config.density)
            && self.format == config.format
    }
}

const NON_DIAGONAL: ShapeSet = ShapeSet(&[
    Shape::Rect,
    Shape::LowerTriang,
    Shape::UpperTriang,
    Shape::Symm,
    Shape::BandDiag,
    Shape::LowerBandTriang,
    Shape::UpperBandTriang,
]);

const fn rule(
    shapes: ShapeSet,
    density: Option<Density>,
    format: Option<Format>,
    storage: StorageKind,
) -> StorageRule {
    StorageRule {
        shapes,
        density,
        format,
        storage,
    }
}

pub const STORAGE_RULES: &[StorageRule] = &[
    rule(ShapeSet(&[Shape::Diag]), None, None, StorageKind::Vector),
    rule(
        ShapeSet(&[Shape::Scalar, Shape::Ident, Shape::Zero]),
        None,
        None,
        StorageKind::Scalar,
    ),
    rule(NON_DIAGONAL, Some(Density::Dense), Some(Format::Array), StorageKind::Array),
    rule(NON_DIAGONAL, None, Some(Format::Vector), StorageKind::Vector),
    rule(ShapeSet(&[Shape::Rect]), Some(Density::Sparse), Some(Format::Csr), StorageKind::Csr),
    rule(ShapeSet(&[Shape::Rect]), Some(Density::Sparse), Some(Format::Csc), StorageKind::Csc),
    rule(ShapeSet(&[Shape::Rect]), Some(Density::Sparse), Some(Format::Coo), StorageKind::Coo),
    rule(NON_DIAGONAL, None, Some(Format::Dia), StorageKind::Dia),
    rule(
        ShapeSet(&[Shape::LowerTriang, Shape::Symm, Shape::LowerBandTriang]),
        None,
        Some(Format::Sky),
        StorageKind::SkyLower,
    ),
    rule(
        ShapeSet(&[Shape::UpperTriang, Shape::UpperBandTriang]),
        None,
        Some(Format::Sky),
        StorageKind::SkyUpper,
    ),
];

impl StorageKind {
    pub fn select(config: &ResolvedConfig) -> core::result::Result<Self, ConfigError> {
        STORAGE_RULES
            .iter()
            .find(|rule| rule.matches(config))
            .map(|rule| rule.storage)
            .ok_or(ConfigError::NoStorageStrategy)
    }
}

/// Components of one matrix type
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub extent: ExtentStrategy,
    pub diagonals: DiagonalStrategy,
    pub storage: StorageKind,
    /// Wrap the storage in the symmetry decorator
    pub symmetric: bool,
    /// Wrap the composition in the bounds-checking decorator
    pub bounds_checking: bool,
    pub compat: CompatChecker,
    pub allocation: AllocationPolicy,
    arr_order: ArrOrder,
    dict_format: DictFormat,
    hash_width: usize,
    /// Configured value of scalar storage
    scalar_value: Option<f64>,
}

impl Assembly {
    pub fn new(config: &ResolvedConfig) -> core::result::Result<Self, ConfigError> {
        let assembly = Self {
            extent: ExtentStrategy::select(config),
            diagonals: DiagonalStrategy::select(config),
            storage: StorageKind::select(config)?,
            symmetric: config.shape == Shape::Symm,
            bounds_checking: config.bounds_checking,
            compat: CompatChecker::new(config.compat_checking),
            allocation: AllocationPolicy::from_config(config),
            arr_order: config.arr_order,
            dict_format: config.dict_format,
            hash_width: config.hash_width,
            scalar_value: config.scalar_value.value().map(|value| value.value()),
        };
        trace!(
            "assembled {config}: {:?} storage, {:?}, {:?}",
            assembly.storage,
            assembly.extent,
            assembly.diagonals
        );
        Ok(assembly)
    }

    /// Build the decorated storage of one instance, every storable
    /// position set to `init`
    pub fn build<T: MatrixElement>(
        &self,
        extent: Extent,
        range: DiagonalRange,
        init: T,
    ) -> Result<Box<dyn StorageFormat<T>>> {
        let pattern = Pattern::new(extent, range);
        let growth = self.allocation.growth(pattern.len());
        let storage: Box<dyn StorageFormat<T>> = match self.storage {
            StorageKind::Array => Box::new(ArrayFormat::new(pattern, self.arr_order, growth)?),
            StorageKind::Vector => Box::new(VectorFormat::new(pattern, growth)?),
            StorageKind::Scalar => Box::new(match self.scalar_value {
                Some(value) => ScalarFormat::fixed(extent.rows, T::from_f64(value)),
                None => ScalarFormat::new(extent.rows, init),
            }),
            StorageKind::Csr => Box::new(CompressedFormat::new(pattern, Axis::Row, growth)?),
            StorageKind::Csc => Box::new(CompressedFormat::new(pattern, Axis::Column, growth)?),
            StorageKind::Coo => {
                let dict = match self.dict_format {
                    DictFormat::Hash => Dictionary::Hash(HashDictionary::new(self.hash_width, growth)?),
                    DictFormat::List => Dictionary::List(ListDictionary::new(growth)?),
                };
                Box::new(CooFormat::new(pattern, dict))
            }
            StorageKind::Dia => Box::new(DiaFormat::new(pattern, growth)?),
            StorageKind::SkyLower => Box::new(SkylineFormat::new(pattern, SkylineSide::Lower, growth)?),
            StorageKind::SkyUpper => Box::new(SkylineFormat::new(pattern, SkylineSide::Upper, growth)?),
        };
        let mut storage: Box<dyn StorageFormat<T>> = if self.symmetric {
            Box::new(Symmetric::new(storage))
        } else {
            storage
        };
        if self.storage != StorageKind::Scalar && !init.is_zero() {
            for (row, col) in pattern.positions() {
                storage.set_element(row, col, init)?;
            }
        }
        if self.bounds_checking {
            storage = Box::new(BoundsChecked::new(storage));
        }
        Ok(storage)
    }
}
