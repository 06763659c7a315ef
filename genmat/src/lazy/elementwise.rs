//! Addition and subtraction nodes

use genmat_core::validation::validate_subscripts;
use genmat_core::{
    result_config, DiagonalRange, Extent, MatrixElement, MatrixExpr, Operation, Promote,
    ResolvedConfig, Result,
};
use log::trace;

use super::{compat_for, extent_of, IDENT, RECT, SCALAR_LIKE, SCALAR_OR_ZERO, ZERO};
use crate::assembler::ShapeSet;

/// Element type of a binary node
pub(crate) type Output<L, R> =
    <<L as MatrixExpr>::Element as Promote<<R as MatrixExpr>::Element>>::Output;

/// Element computation of an elementwise node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementwiseKernel {
    /// Every element is zero
    Zero,
    /// One on the diagonal
    Identity,
    /// The left operand alone
    Left,
    /// The right operand alone
    Right,
    /// The negated right operand
    NegRight,
    /// Combine on the main diagonal only
    Diagonal,
    /// Combine everywhere
    Plain,
    /// Combine inside the result band
    Banded,
}

#[derive(Debug, Clone, Copy)]
pub struct ElementwiseRule {
    pub left: ShapeSet,
    pub right: ShapeSet,
    pub kernel: ElementwiseKernel,
}

const fn rule(left: ShapeSet, right: ShapeSet, kernel: ElementwiseKernel) -> ElementwiseRule {
    ElementwiseRule {
        left,
        right,
        kernel,
    }
}

use ElementwiseKernel::*;

pub const ADD_RULES: &[ElementwiseRule] = &[
    rule(ZERO, ZERO, Zero),
    rule(IDENT, ZERO, Identity),
    rule(ZERO, IDENT, Identity),
    rule(ShapeSet::ANY, ZERO, Left),
    rule(ZERO, ShapeSet::ANY, Right),
    rule(SCALAR_LIKE, SCALAR_LIKE, Diagonal),
    rule(RECT, RECT, Plain),
    rule(ShapeSet::ANY, ShapeSet::ANY, Banded),
];

pub const SUB_RULES: &[ElementwiseRule] = &[
    rule(ZERO, ZERO, Zero),
    rule(IDENT, IDENT, Zero),
    rule(IDENT, ZERO, Identity),
    rule(SCALAR_OR_ZERO, SCALAR_LIKE, Diagonal),
    rule(ShapeSet::ANY, ZERO, Left),
    rule(ZERO, ShapeSet::ANY, NegRight),
    rule(RECT, RECT, Plain),
    rule(ShapeSet::ANY, ShapeSet::ANY, Banded),
];

impl ElementwiseKernel {
    pub fn select(op: Operation, left: &ResolvedConfig, right: &ResolvedConfig) -> Self {
        let rules = match op {
            Operation::Subtract => SUB_RULES,
            _ => ADD_RULES,
        };
        rules
            .iter()
            .find(|rule| rule.left.contains(left.shape) && rule.right.contains(right.shape))
            .map_or(Banded, |rule| rule.kernel)
    }
}

/// Lazy `left + right` or `left - right`
pub struct ElementwiseNode<'a, L: MatrixExpr, R: MatrixExpr> {
    op: Operation,
    left: &'a L,
    right: &'a R,
    config: ResolvedConfig,
    extent: Extent,
    range: DiagonalRange,
    kernel: ElementwiseKernel,
}

impl<'a, L, R> ElementwiseNode<'a, L, R>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    /// Build the node, checking operand extents if either operand asks for it
    pub fn new(op: Operation, left: &'a L, right: &'a R) -> Result<Self> {
        compat_for(left.config(), right.config()).check_same(op, extent_of(left), extent_of(right))?;
        let config = result_config(op, left.config(), right.config())?;
        let extent = Extent::new(left.rows().min(right.rows()), left.cols().min(right.cols()));
        let range = DiagonalRange::new(
            left.first_diag().min(right.first_diag()),
            left.last_diag().max(right.last_diag()),
        )
        .clipped(extent.rows, extent.cols);
        let kernel = ElementwiseKernel::select(op, left.config(), right.config());
        trace!("{op} of {} and {}: {kernel:?} kernel", left.config().shape, right.config().shape);
        Ok(Self {
            op,
            left,
            right,
            config,
            extent,
            range,
            kernel,
        })
    }

    pub fn kernel(&self) -> ElementwiseKernel {
        self.kernel
    }

    fn lhs(&self, row: usize, col: usize) -> Result<Output<L, R>> {
        Ok(<L::Element as Promote<R::Element>>::lift_left(self.left.get_element(row, col)?))
    }

    fn rhs(&self, row: usize, col: usize) -> Result<Output<L, R>> {
        Ok(<L::Element as Promote<R::Element>>::lift_right(self.right.get_element(row, col)?))
    }

    fn combine(&self, row: usize, col: usize) -> Result<Output<L, R>> {
        let (lhs, rhs) = (self.lhs(row, col)?, self.rhs(row, col)?);
        Ok(match self.op {
            Operation::Subtract => lhs.wrapping_sub(rhs),
            _ => lhs.wrapping_add(rhs),
        })
    }
}

impl<L, R> MatrixExpr for ElementwiseNode<'_, L, R>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    type Element = Output<L, R>;

    fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    fn rows(&self) -> usize {
        self.extent.rows
    }

    fn cols(&self) -> usize {
        self.extent.cols
    }

    fn first_diag(&self) -> isize {
        self.range.first()
    }

    fn last_diag(&self) -> isize {
        self.range.last()
    }

    fn get_element(&self, row: usize, col: usize) -> Result<Self::Element> {
        if self.config.bounds_checking {
            validate_subscripts(row, col, self.extent)?;
        }
        let zero = <Self::Element as MatrixElement>::zero();
        match self.kernel {
            Zero => Ok(zero),
            Identity if row == col => Ok(<Self::Element as MatrixElement>::one()),
            Identity => Ok(zero),
            Left => self.lhs(row, col),
            Right => self.rhs(row, col),
            NegRight => Ok(zero.wrapping_sub(self.rhs(row, col)?)),
            Diagonal if row == col => self.combine(row, col),
            Diagonal => Ok(zero),
            Plain => self.combine(row, col),
            Banded if self.range.contains(row, col) => self.combine(row, col),
            Banded => Ok(zero),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{evaluate, Evaluate};
    use crate::matrix::{Matrix, MatrixArgs, MatrixType};
    use genmat_core::{ErrorCategory, MatrixSpec, Shape, ShapeSpec};

    fn matrix<T: MatrixElement>(shape: Shape, args: MatrixArgs<T>) -> Matrix<T> {
        let spec = MatrixSpec::new().with_shape(ShapeSpec::new(shape));
        MatrixType::<T>::from_spec(&spec).unwrap().create(args).unwrap()
    }

    #[test]
    fn test_kernel_selection() {
        let config = |shape| {
            let spec = MatrixSpec::new().with_shape(ShapeSpec::new(shape));
            MatrixType::<f64>::from_spec(&spec).unwrap().config().clone()
        };
        let (zero, ident, rect, lower) = (
            config(Shape::Zero),
            config(Shape::Ident),
            config(Shape::Rect),
            config(Shape::LowerTriang),
        );
        let add = |l: &ResolvedConfig, r: &ResolvedConfig| ElementwiseKernel::select(Operation::Add, l, r);
        let sub = |l: &ResolvedConfig, r: &ResolvedConfig| ElementwiseKernel::select(Operation::Subtract, l, r);
        assert_eq!(add(&zero, &zero), Zero);
        assert_eq!(add(&ident, &zero), Identity);
        assert_eq!(add(&rect, &zero), Left);
        assert_eq!(add(&zero, &lower), Right);
        assert_eq!(add(&ident, &ident), Diagonal);
        assert_eq!(add(&rect, &rect), Plain);
        assert_eq!(add(&rect, &lower), Banded);
        assert_eq!(sub(&ident, &ident), Zero);
        assert_eq!(sub(&zero, &ident), Diagonal);
        assert_eq!(sub(&zero, &rect), NegRight);
    }

    #[test]
    fn test_band_masked_sum() {
        let lower = matrix(Shape::LowerTriang, MatrixArgs::new().with_order(3).with_value(1.0));
        let upper = matrix(Shape::UpperTriang, MatrixArgs::new().with_order(3).with_value(2.0f32));
        let sum = (&lower + &upper).unwrap();
        assert_eq!(sum.config().shape, Shape::Rect);
        assert_eq!((sum.first_diag(), sum.last_diag()), (-2, 2));
        assert_eq!(sum.get_element(0, 0), Ok(3.0f64));
        assert_eq!(sum.get_element(2, 0), Ok(1.0));
        assert_eq!(sum.get_element(0, 2), Ok(2.0));
    }

    #[test]
    fn test_difference_with_zero() {
        let zero = matrix::<i32>(Shape::Zero, MatrixArgs::new().with_order(2));
        let mut rect = matrix::<i32>(Shape::Rect, MatrixArgs::new().with_rows(2).with_cols(2));
        rect.set_element(1, 0, 4).unwrap();
        let negated = evaluate(&(&zero - &rect).unwrap()).unwrap();
        assert_eq!(negated.get_element(1, 0), Ok(-4));
        assert_eq!(negated.get_element(0, 0), Ok(0));
    }

    #[test]
    fn test_unsigned_difference_wraps() {
        let a = matrix::<u32>(Shape::Rect, MatrixArgs::new().with_rows(2).with_cols(2).with_value(1));
        let mut b = matrix::<u32>(Shape::Rect, MatrixArgs::new().with_rows(2).with_cols(2));
        b.set_element(1, 0, 4).unwrap();
        let difference = (&a - &b).unwrap().evaluate().unwrap();
        assert_eq!(difference.get_element(1, 0), Ok(u32::MAX - 2));
        assert_eq!(difference.get_element(0, 0), Ok(1));

        let zero = matrix::<u32>(Shape::Zero, MatrixArgs::new().with_order(2));
        let negated = (&zero - &b).unwrap().evaluate().unwrap();
        assert_eq!(negated.get_element(1, 0), Ok(0u32.wrapping_sub(4)));
    }

    #[test]
    fn test_incompatible_extents() {
        let left = matrix::<f64>(Shape::Rect, MatrixArgs::new().with_rows(2).with_cols(3));
        let right = matrix::<f64>(Shape::Rect, MatrixArgs::new().with_rows(3).with_cols(2));
        let err = (&left + &right).err().unwrap();
        assert_eq!(err.category(), ErrorCategory::IncompatibleOperands);
    }

    #[test]
    fn test_nested_nodes() {
        let ident = matrix::<f64>(Shape::Ident, MatrixArgs::new().with_order(3));
        let band = matrix::<f64>(
            Shape::BandDiag,
            MatrixArgs::new().with_order(3).with_diags(3).with_value(2.0),
        );
        let sum = (&ident + &band).unwrap();
        let twice = (&sum + &sum).unwrap();
        assert_eq!(twice.get_element(1, 1), Ok(6.0));
        assert_eq!(twice.get_element(0, 1), Ok(4.0));
        assert_eq!(twice.get_element(0, 2), Ok(0.0));
        let result = evaluate(&twice).unwrap();
        assert_eq!(result.config().shape, Shape::BandDiag);
        assert_eq!(result.diags(), 3);
        assert_eq!(result.get_element(2, 1), Ok(4.0));
    }
}
