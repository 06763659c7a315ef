//! Matrix element type constraints
//!
//! Element types are plain old data so buffers can be zero-initialised
//! through `bytemuck`, and carry their [`ElementType`] tag so a Rust type can
//! be checked against a resolved configuration.

use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

use crate::features::ElementType;

/// Trait for types that can be stored as matrix elements
pub trait MatrixElement:
    bytemuck::Pod
    + PartialEq
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Feature-level tag for this type
    fn element_type() -> ElementType;

    /// Additive identity
    fn zero() -> Self {
        <Self as bytemuck::Zeroable>::zeroed()
    }

    /// Multiplicative identity
    fn one() -> Self;

    /// Convert from a configuration literal
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Sum that wraps on integer overflow
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Difference that wraps on integer underflow
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Product that wraps on integer overflow
    fn wrapping_mul(self, rhs: Self) -> Self;
}

macro_rules! impl_matrix_element {
    (@arith int) => {
        fn wrapping_add(self, rhs: Self) -> Self {
            <Self>::wrapping_add(self, rhs)
        }

        fn wrapping_sub(self, rhs: Self) -> Self {
            <Self>::wrapping_sub(self, rhs)
        }

        fn wrapping_mul(self, rhs: Self) -> Self {
            <Self>::wrapping_mul(self, rhs)
        }
    };
    (@arith float) => {
        fn wrapping_add(self, rhs: Self) -> Self {
            self + rhs
        }

        fn wrapping_sub(self, rhs: Self) -> Self {
            self - rhs
        }

        fn wrapping_mul(self, rhs: Self) -> Self {
            self * rhs
        }
    };
    ($($ty:ty => $tag:ident, $one:expr, $kind:ident;)*) => {
        $(
            impl MatrixElement for $ty {
                fn element_type() -> ElementType {
                    ElementType::$tag
                }

                fn one() -> Self {
                    $one
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                impl_matrix_element!(@arith $kind);
            }
        )*
    };
}

impl_matrix_element! {
    i32 => I32, 1, int;
    u32 => U32, 1, int;
    i64 => I64, 1, int;
    u64 => U64, 1, int;
    f32 => F32, 1.0, float;
    f64 => F64, 1.0, float;
}

/// Element type of a binary expression over `Self` and `Rhs`
///
/// `Output` is the wider of the two types, matching
/// [`ElementType::promote`].
pub trait Promote<Rhs: MatrixElement>: MatrixElement {
    type Output: MatrixElement;

    fn lift_left(value: Self) -> <Self as Promote<Rhs>>::Output;

    fn lift_right(value: Rhs) -> <Self as Promote<Rhs>>::Output;
}

macro_rules! impl_promote {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Output = $out;

                #[inline]
                fn lift_left(value: $lhs) -> $out {
                    value as $out
                }

                #[inline]
                fn lift_right(value: $rhs) -> $out {
                    value as $out
                }
            }
        )*
    };
}

impl_promote! {
    i32, i32 => i32; i32, u32 => u32; i32, i64 => i64;
    i32, u64 => u64; i32, f32 => f32; i32, f64 => f64;
    u32, i32 => u32; u32, u32 => u32; u32, i64 => i64;
    u32, u64 => u64; u32, f32 => f32; u32, f64 => f64;
    i64, i32 => i64; i64, u32 => i64; i64, i64 => i64;
    i64, u64 => u64; i64, f32 => f32; i64, f64 => f64;
    u64, i32 => u64; u64, u32 => u64; u64, i64 => u64;
    u64, u64 => u64; u64, f32 => f32; u64, f64 => f64;
    f32, i32 => f32; f32, u32 => f32; f32, i64 => f32;
    f32, u64 => f32; f32, f32 => f32; f32, f64 => f64;
    f64, i32 => f64; f64, u32 => f64; f64, i64 => f64;
    f64, u64 => f64; f64, f32 => f64; f64, f64 => f64;
}
