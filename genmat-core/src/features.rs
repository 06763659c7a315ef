//! Feature vocabulary
//!
//! Every configurable aspect of a generated matrix is one of the small enums
//! below. The nested specification tree, the flat feature record and the
//! resolved configuration are all built from these values.

/// Numeric element (or index) type
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementType {
    I32 = 0,
    U32 = 1,
    I64 = 2,
    U64 = 3,
    F32 = 4,
    F64 = 5,
}

impl ElementType {
    /// All element types, narrowest first
    pub const ALL: [ElementType; 6] = [
        ElementType::I32,
        ElementType::U32,
        ElementType::I64,
        ElementType::U64,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Size in bytes of one value
    pub const fn size_bytes(self) -> usize {
        match self {
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    pub const fn is_integral(self) -> bool {
        !matches!(self, ElementType::F32 | ElementType::F64)
    }

    /// Largest power of ten representable (zero for integers)
    pub const fn max_exponent10(self) -> i32 {
        match self {
            ElementType::F32 => 38,
            ElementType::F64 => 308,
            _ => 0,
        }
    }

    /// Number of mantissa (or value) bits
    pub const fn digits(self) -> u32 {
        match self {
            ElementType::I32 => 31,
            ElementType::U32 => 32,
            ElementType::I64 => 63,
            ElementType::U64 => 64,
            ElementType::F32 => 24,
            ElementType::F64 => 53,
        }
    }

    /// The wider of two types
    ///
    /// A type is wider when it covers a larger decimal exponent range; ties
    /// are broken by the number of digits.
    pub const fn promote(self, other: ElementType) -> ElementType {
        let self_exp = self.max_exponent10();
        let other_exp = other.max_exponent10();
        if self_exp < other_exp || (self_exp == other_exp && self.digits() < other.digits()) {
            other
        } else {
            self
        }
    }
}

impl core::fmt::Display for ElementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ElementType::I32 => "i32",
            ElementType::U32 => "u32",
            ElementType::I64 => "i64",
            ElementType::U64 => "u64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        };
        write!(f, "{name}")
    }
}

/// Mathematical sparsity pattern class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    Rect,
    Diag,
    Scalar,
    Ident,
    Zero,
    LowerTriang,
    UpperTriang,
    Symm,
    BandDiag,
    LowerBandTriang,
    UpperBandTriang,
}

impl Shape {
    pub const ALL: [Shape; 11] = [
        Shape::Rect,
        Shape::Diag,
        Shape::Scalar,
        Shape::Ident,
        Shape::Zero,
        Shape::LowerTriang,
        Shape::UpperTriang,
        Shape::Symm,
        Shape::BandDiag,
        Shape::LowerBandTriang,
        Shape::UpperBandTriang,
    ];

    /// Every shape except `Rect` is square and sized by an order
    pub const fn is_square(self) -> bool {
        !matches!(self, Shape::Rect)
    }

    /// Shapes whose only storable positions lie on the main diagonal
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Shape::Diag | Shape::Scalar | Shape::Ident | Shape::Zero)
    }

    /// Shapes sized by an explicit diagonal count
    pub const fn is_banded(self) -> bool {
        matches!(
            self,
            Shape::BandDiag | Shape::LowerBandTriang | Shape::UpperBandTriang
        )
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Shape::Rect => "rect",
            Shape::Diag => "diag",
            Shape::Scalar => "scalar",
            Shape::Ident => "ident",
            Shape::Zero => "zero",
            Shape::LowerTriang => "lower_triang",
            Shape::UpperTriang => "upper_triang",
            Shape::Symm => "symm",
            Shape::BandDiag => "band_diag",
            Shape::LowerBandTriang => "lower_band_triang",
            Shape::UpperBandTriang => "upper_band_triang",
        };
        write!(f, "{name}")
    }
}

/// Whether explicit zeros are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Density {
    Dense,
    Sparse,
}

impl Density {
    pub const ALL: [Density; 2] = [Density::Dense, Density::Sparse];
}

impl core::fmt::Display for Density {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Density::Dense => write!(f, "dense"),
            Density::Sparse => write!(f, "sparse"),
        }
    }
}

/// Physical storage layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Format {
    Array,
    Vector,
    Csr,
    Csc,
    Coo,
    Dia,
    Sky,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Array,
        Format::Vector,
        Format::Csr,
        Format::Csc,
        Format::Coo,
        Format::Dia,
        Format::Sky,
    ];

    /// Formats addressing entries through explicit coordinates
    pub const fn is_coordinate(self) -> bool {
        matches!(self, Format::Csr | Format::Csc | Format::Coo)
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Format::Array => "array",
            Format::Vector => "vector",
            Format::Csr => "CSR",
            Format::Csc => "CSC",
            Format::Coo => "COO",
            Format::Dia => "DIA",
            Format::Sky => "SKY",
        };
        write!(f, "{name}")
    }
}

/// Dictionary backing the coordinate format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DictFormat {
    Hash,
    List,
}

/// Element ordering of dense two-dimensional arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrOrder {
    /// C-like ordering
    RowMajor,
    /// Fortran-like ordering
    ColumnMajor,
}

/// Memory allocation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Malloc {
    /// Capacity fixed when the type is configured
    Fixed,
    /// Buffers grow on demand
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptFlag {
    Speed,
    Space,
}

impl OptFlag {
    pub const ALL: [OptFlag; 2] = [OptFlag::Speed, OptFlag::Space];
}

/// Global default for the individual checking policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrFlag {
    CheckAsDefault,
    NoChecking,
}

/// A value either fixed by the configuration or supplied per instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dim<V> {
    Static(V),
    Dynamic,
}

impl<V: Copy> Dim<V> {
    pub fn is_static(&self) -> bool {
        matches!(self, Dim::Static(_))
    }

    /// The static value, if any
    pub fn value(&self) -> Option<V> {
        match self {
            Dim::Static(v) => Some(*v),
            Dim::Dynamic => None,
        }
    }
}

/// Numeric literal carried in configurations
///
/// Compares and hashes by bit pattern so configurations can key memo tables.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Literal(f64);

impl Literal {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Literal {}

impl core::hash::Hash for Literal {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl core::fmt::Display for Literal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_promotion_order() {
        assert_eq!(ElementType::I32.promote(ElementType::U32), ElementType::U32);
        assert_eq!(ElementType::U64.promote(ElementType::I64), ElementType::U64);
        assert_eq!(ElementType::U64.promote(ElementType::F32), ElementType::F32);
        assert_eq!(ElementType::F64.promote(ElementType::F32), ElementType::F64);
        for ty in ElementType::ALL {
            assert_eq!(ty.promote(ty), ty);
        }
    }

    #[test]
    fn test_literal_identity() {
        assert_eq!(Literal::new(0.25), Literal::from(0.25));
        assert_ne!(Literal::new(0.0), Literal::new(-0.0));
    }
}
