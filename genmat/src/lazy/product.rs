//! Multiplication nodes
//!
//! Every output element is a sum over the contraction index. Non-leaf
//! operands are read through an [`ElementCache`](super::ElementCache) so an
//! element of a nested expression is computed at most once per product.

use genmat_core::validation::validate_subscripts;
use genmat_core::{
    result_config, DiagonalRange, Extent, MatrixElement, MatrixExpr, Operation, Promote,
    ResolvedConfig, Result,
};
use log::trace;

use super::cache::Operand;
use super::elementwise::Output;
use super::{compat_for, extent_of, DIAGONAL, IDENT, RECT, ZERO};
use crate::assembler::ShapeSet;

/// Element computation of a product node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKernel {
    Zero,
    /// Identity times identity
    IdentIdent,
    /// Identity times `X` is `X`
    IdentLeft,
    /// `X` times identity is `X`
    IdentRight,
    /// Diagonal times diagonal, on the diagonal only
    DiagDiag,
    /// Diagonal times `X` scales the rows of `X`
    DiagLeft,
    /// `X` times diagonal scales the columns of `X`
    DiagRight,
    /// Full contraction
    Rect,
    /// Contraction clipped to both operand bands
    Banded,
}

#[derive(Debug, Clone, Copy)]
pub struct ProductRule {
    pub left: ShapeSet,
    pub right: ShapeSet,
    pub kernel: ProductKernel,
}

const fn rule(left: ShapeSet, right: ShapeSet, kernel: ProductKernel) -> ProductRule {
    ProductRule {
        left,
        right,
        kernel,
    }
}

pub const PRODUCT_RULES: &[ProductRule] = &[
    rule(ZERO, ShapeSet::ANY, ProductKernel::Zero),
    rule(ShapeSet::ANY, ZERO, ProductKernel::Zero),
    rule(IDENT, IDENT, ProductKernel::IdentIdent),
    rule(IDENT, ShapeSet::ANY, ProductKernel::IdentLeft),
    rule(ShapeSet::ANY, IDENT, ProductKernel::IdentRight),
    rule(DIAGONAL, DIAGONAL, ProductKernel::DiagDiag),
    rule(DIAGONAL, ShapeSet::ANY, ProductKernel::DiagLeft),
    rule(ShapeSet::ANY, DIAGONAL, ProductKernel::DiagRight),
    rule(RECT, RECT, ProductKernel::Rect),
    rule(ShapeSet::ANY, ShapeSet::ANY, ProductKernel::Banded),
];

impl ProductKernel {
    pub fn select(left: &ResolvedConfig, right: &ResolvedConfig) -> Self {
        PRODUCT_RULES
            .iter()
            .find(|rule| rule.left.contains(left.shape) && rule.right.contains(right.shape))
            .map_or(ProductKernel::Banded, |rule| rule.kernel)
    }
}

/// Lazy `left * right`
pub struct ProductNode<'a, L: MatrixExpr, R: MatrixExpr> {
    left: Operand<'a, L>,
    right: Operand<'a, R>,
    config: ResolvedConfig,
    extent: Extent,
    range: DiagonalRange,
    /// Length of the contraction index
    inner: usize,
    kernel: ProductKernel,
}

impl<'a, L, R> ProductNode<'a, L, R>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Element: Promote<R::Element>,
{
    /// Build the node, checking the inner dimensions if either operand asks
    /// for it
    pub fn new(left: &'a L, right: &'a R) -> Result<Self> {
        compat_for(left.config(), right.config()).check_product(extent_of(left), extent_of(right))?;
        let config = result_config(Operation::Multiply, left.config(), right.config())?;
        let extent = Extent::new(left.rows(), right.cols());
        let range = DiagonalRange::new(
            left.first_diag() + right.first_diag(),
            left.last_diag() + right.last_diag(),
        )
        .clipped(extent.rows, extent.cols);
        let kernel = ProductKernel::select(left.config(), right.config());
        trace!(
            "product of {} and {}: {kernel:?} kernel",
            left.config().shape,
            right.config().shape
        );
        Ok(Self {
            left: Operand::new(left),
            right: Operand::new(right),
            config,
            extent,
            range,
            inner: left.cols().min(right.rows()),
            kernel,
        })
    }

    pub fn kernel(&self) -> ProductKernel {
        self.kernel
    }

    /// Operand reads that reached a non-leaf expression, left and right
    pub fn cache_misses(&self) -> (Option<usize>, Option<usize>) {
        (
            self.left.cache().map(|cache| cache.misses()),
            self.right.cache().map(|cache| cache.misses()),
        )
    }

    fn lhs(&self, row: usize, col: usize) -> Result<Output<L, R>> {
        Ok(<L::Element as Promote<R::Element>>::lift_left(self.left.get(row, col)?))
    }

    fn rhs(&self, row: usize, col: usize) -> Result<Output<L, R>> {
        Ok(<L::Element as Promote<R::Element>>::lift_right(self.right.get(row, col)?))
    }

    /// Sum of `left[row, k] * right[k, col]` for `k` in `ks`
    fn contract(
        &self,
        row: usize,
        col: usize,
        ks: impl Iterator<Item = usize>,
    ) -> Result<Output<L, R>> {
        let mut sum = <Output<L, R> as MatrixElement>::zero();
        for k in ks {
            sum = sum.wrapping_add(self.lhs(row, k)?.wrapping_mul(self.rhs(k, col)?));
        }
        Ok(sum)
    }

    /// Contraction indices where both operands may be nonzero
    fn band_span(&self, row: usize, col: usize) -> core::ops::Range<usize> {
        let left = self.left.expr();
        let right = self.right.expr();
        let (row, col) = (row as isize, col as isize);
        let start = (row + left.first_diag())
            .max(col - right.last_diag())
            .max(0);
        let stop = (row + left.last_diag())
            .min(col - right.first_diag())
            .min(self.inner as isize - 1);
        if start > stop {
            0..0
        } else {
            start as usize..stop as usize + 1
        }
    }
}

impl<L, R> MatrixExpr for ProductNode<'_, L, R>
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
            ProductKernel::Zero => Ok(zero),
            ProductKernel::IdentIdent if row == col => Ok(<Self::Element as MatrixElement>::one()),
            ProductKernel::IdentIdent => Ok(zero),
            ProductKernel::IdentLeft => self.rhs(row, col),
            ProductKernel::IdentRight => self.lhs(row, col),
            ProductKernel::DiagDiag if row == col => {
                Ok(self.lhs(row, row)?.wrapping_mul(self.rhs(row, row)?))
            }
            ProductKernel::DiagDiag => Ok(zero),
            ProductKernel::DiagLeft => Ok(self.lhs(row, row)?.wrapping_mul(self.rhs(row, col)?)),
            ProductKernel::DiagRight => Ok(self.lhs(row, col)?.wrapping_mul(self.rhs(col, col)?)),
            ProductKernel::Rect => self.contract(row, col, 0..self.inner),
            ProductKernel::Banded if self.range.contains(row, col) => {
                self.contract(row, col, self.band_span(row, col))
            }
            ProductKernel::Banded => Ok(zero),
        }
    }
}
