//! Error types for matrix configuration and matrix use
//!
//! Configuration problems are reported once, when a feature specification is
//! resolved. Everything else is a runtime error raised by a single operation.

use crate::features::{Density, Format, Shape};

/// Which dimension-like feature a configuration error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionKind {
    Rows,
    Cols,
    Order,
    Diags,
}

impl core::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DimensionKind::Rows => "rows",
            DimensionKind::Cols => "cols",
            DimensionKind::Order => "order",
            DimensionKind::Diags => "diags",
        };
        write!(f, "{name}")
    }
}

/// Errors raised while resolving a feature specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The index type must be an integer type
    IndexTypeNotIntegral,
    /// The format (or its absence) is not legal for the shape
    IllegalFormatForShape {
        shape: Shape,
        format: Option<Format>,
    },
    /// Coordinate formats need sparse density, the array format needs dense
    DensityFormatMismatch { density: Density, format: Format },
    /// A dimension was declared static without a value
    DimensionNotSpecified(DimensionKind),
    /// A static dimension must be strictly positive
    NonPositiveDimension(DimensionKind),
    /// A scalar shape was declared with a static value but no number
    ScalarValueNotSpecified,
    /// The hash dictionary needs a positive width
    ZeroHashWidth,
    /// A fixed-capacity allocation needs a positive size
    ZeroFixedSize,
    /// Growth ratio must be positive and the increment non-negative
    InvalidGrowth,
    /// A square shape was instantiated with different row and column counts
    NonSquareExtent { rows: usize, cols: usize },
    /// An instance argument contradicts a static dimension
    StaticDimensionMismatch {
        kind: DimensionKind,
        expected: usize,
        found: usize,
    },
    /// The declared element type differs from the Rust element type
    ElementTypeMismatch,
    /// No storage strategy exists for the resolved combination
    NoStorageStrategy,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::IndexTypeNotIntegral => write!(f, "index type must be integral"),
            ConfigError::IllegalFormatForShape { shape, format } => match format {
                Some(format) => write!(f, "format {format} is not legal for shape {shape}"),
                None => write!(f, "shape {shape} requires an explicit format"),
            },
            ConfigError::DensityFormatMismatch { density, format } => {
                write!(f, "format {format} cannot be combined with {density} density")
            }
            ConfigError::DimensionNotSpecified(kind) => {
                write!(f, "static {kind} declared without a number")
            }
            ConfigError::NonPositiveDimension(kind) => {
                write!(f, "{kind} must be strictly positive")
            }
            ConfigError::ScalarValueNotSpecified => {
                write!(f, "static scalar value declared without a number")
            }
            ConfigError::ZeroHashWidth => write!(f, "hash width must be positive"),
            ConfigError::ZeroFixedSize => write!(f, "fixed allocation size must be positive"),
            ConfigError::InvalidGrowth => {
                write!(f, "growth ratio must be positive and growing non-negative")
            }
            ConfigError::NonSquareExtent { rows, cols } => {
                write!(f, "square shape instantiated as {rows}x{cols}")
            }
            ConfigError::StaticDimensionMismatch {
                kind,
                expected,
                found,
            } => write!(f, "static {kind} is {expected}, argument was {found}"),
            ConfigError::ElementTypeMismatch => {
                write!(f, "element type does not match the requested Rust type")
            }
            ConfigError::NoStorageStrategy => {
                write!(f, "no storage strategy for the resolved configuration")
            }
        }
    }
}

/// Arithmetic operation named in compatibility errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Assign,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
            Operation::Assign => "assignment",
        };
        write!(f, "{name}")
    }
}

/// Coarse error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Bounds,
    PatternViolation,
    IncompatibleOperands,
    Allocation,
}

/// Errors that can occur while building or using a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Illegal or inconsistent feature specification
    Configuration(ConfigError),
    /// Index outside `[0, rows) x [0, cols)`
    Bounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Nonzero write at a position the storage cannot represent
    PatternViolation { row: usize, col: usize },
    /// Operand extents do not fit the operation
    IncompatibleOperands {
        op: Operation,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Storage growth failed
    Allocation { requested: usize },
}

impl MatrixError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatrixError::Configuration(_) => ErrorCategory::Configuration,
            MatrixError::Bounds { .. } => ErrorCategory::Bounds,
            MatrixError::PatternViolation { .. } => ErrorCategory::PatternViolation,
            MatrixError::IncompatibleOperands { .. } => ErrorCategory::IncompatibleOperands,
            MatrixError::Allocation { .. } => ErrorCategory::Allocation,
        }
    }
}

impl From<ConfigError> for MatrixError {
    fn from(err: ConfigError) -> Self {
        MatrixError::Configuration(err)
    }
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::Configuration(err) => write!(f, "configuration error: {err}"),
            MatrixError::Bounds {
                row,
                col,
                rows,
                cols,
            } => write!(f, "subscripts ({row}, {col}) out of bounds for {rows}x{cols}"),
            MatrixError::PatternViolation { row, col } => {
                write!(f, "position ({row}, {col}) cannot hold a nonzero value")
            }
            MatrixError::IncompatibleOperands { op, left, right } => write!(
                f,
                "argument matrices are incompatible for {op}: {}x{} and {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::Allocation { requested } => {
                write!(f, "memory allocation failed ({requested} elements)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
