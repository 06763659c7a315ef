//! Lazy arithmetic
//!
//! `&a + &b`, `&a - &b` and `&a * &b` build expression nodes that borrow
//! their operands and compute elements on demand. Nodes are expressions
//! themselves and nest freely. Nothing is stored until a node is evaluated
//! into a fresh matrix or assigned into an existing one.
//!
//! Each node picks a kernel from a rule table keyed on the operand shapes;
//! the first matching rule wins.

pub mod cache;
pub mod elementwise;
pub mod product;

pub use cache::{ElementCache, Operand};
pub use elementwise::{ElementwiseKernel, ElementwiseNode};
pub use product::{ProductKernel, ProductNode};

use genmat_core::{
    Dim, Extent, MatrixExpr, Operation, Promote, ResolvedConfig, Result, Shape,
};

use crate::assembler::ShapeSet;
use crate::checkers::CompatChecker;
use crate::matrix::{Matrix, MatrixArgs, MatrixType};

pub(crate) const ZERO: ShapeSet = ShapeSet(&[Shape::Zero]);
pub(crate) const IDENT: ShapeSet = ShapeSet(&[Shape::Ident]);
pub(crate) const RECT: ShapeSet = ShapeSet(&[Shape::Rect]);
pub(crate) const SCALAR_LIKE: ShapeSet = ShapeSet(&[Shape::Scalar, Shape::Ident]);
pub(crate) const SCALAR_OR_ZERO: ShapeSet = ShapeSet(&[Shape::Scalar, Shape::Ident, Shape::Zero]);
pub(crate) const DIAGONAL: ShapeSet = ShapeSet(&[Shape::Diag, Shape::Scalar]);

pub(crate) fn extent_of<E: MatrixExpr + ?Sized>(expr: &E) -> Extent {
    Extent::new(expr.rows(), expr.cols())
}

/// Compatibility checker of a binary node; active if either operand asks
pub(crate) fn compat_for(left: &ResolvedConfig, right: &ResolvedConfig) -> CompatChecker {
    CompatChecker::new(left.compat_checking || right.compat_checking)
}

/// `left + right`
pub fn add<'a, L, R>(left: &'a L, right: &'a R) -> Result<ElementwiseNode<'a, L, R>>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    ElementwiseNode::new(Operation::Add, left, right)
}

/// `left - right`
pub fn sub<'a, L, R>(left: &'a L, right: &'a R) -> Result<ElementwiseNode<'a, L, R>>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    ElementwiseNode::new(Operation::Subtract, left, right)
}

/// `left * right`
pub fn mul<'a, L, R>(left: &'a L, right: &'a R) -> Result<ProductNode<'a, L, R>>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    ProductNode::new(left, right)
}

/// Materialise an expression into a new matrix of its result type
pub fn evaluate<E: MatrixExpr + ?Sized>(expr: &E) -> Result<Matrix<E::Element>> {
    let config = expr.config();
    let ty = MatrixType::<E::Element>::from_config(config.clone())?;
    let mut args = if config.shape == Shape::Rect {
        MatrixArgs::new().with_rows(expr.rows()).with_cols(expr.cols())
    } else {
        MatrixArgs::new().with_order(expr.rows())
    };
    if config.shape.is_banded() && config.diags == Dim::Dynamic {
        args = args.with_diags(expr.diagonal_range().diags());
    }
    let mut matrix = ty.create(args)?;
    matrix.assign(expr)?;
    Ok(matrix)
}

/// `evaluate` as a method of every expression
pub trait Evaluate: MatrixExpr {
    fn evaluate(&self) -> Result<Matrix<Self::Element>> {
        evaluate(self)
    }
}

impl<E: MatrixExpr + ?Sized> Evaluate for E {}

/// Operator traits on references, building lazy nodes
macro_rules! impl_operators {
    ([$($generics:tt)*] $ty:ty) => {
        impl<'o, $($generics)*, Rhs> core::ops::Add<&'o Rhs> for &'o $ty
        where
            $ty: MatrixExpr,
            Rhs: MatrixExpr,
            <$ty as MatrixExpr>::Element: Promote<Rhs::Element>,
        {
            type Output = Result<ElementwiseNode<'o, $ty, Rhs>>;

            fn add(self, rhs: &'o Rhs) -> Self::Output {
                ElementwiseNode::new(Operation::Add, self, rhs)
            }
        }

        impl<'o, $($generics)*, Rhs> core::ops::Sub<&'o Rhs> for &'o $ty
        where
            $ty: MatrixExpr,
            Rhs: MatrixExpr,
            <$ty as MatrixExpr>::Element: Promote<Rhs::Element>,
        {
            type Output = Result<ElementwiseNode<'o, $ty, Rhs>>;

            fn sub(self, rhs: &'o Rhs) -> Self::Output {
                ElementwiseNode::new(Operation::Subtract, self, rhs)
            }
        }

        impl<'o, $($generics)*, Rhs> core::ops::Mul<&'o Rhs> for &'o $ty
        where
            $ty: MatrixExpr,
            Rhs: MatrixExpr,
            <$ty as MatrixExpr>::Element: Promote<Rhs::Element>,
        {
            type Output = Result<ProductNode<'o, $ty, Rhs>>;

            fn mul(self, rhs: &'o Rhs) -> Self::Output {
                ProductNode::new(self, rhs)
            }
        }
    };
}

impl_operators!([T: genmat_core::MatrixElement] Matrix<T>);
impl_operators!(['n, L: MatrixExpr, R: MatrixExpr] ElementwiseNode<'n, L, R>);
impl_operators!(['n, L: MatrixExpr, R: MatrixExpr] ProductNode<'n, L, R>);
