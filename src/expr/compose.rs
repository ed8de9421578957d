//! Composition API: operators and functions that build expression trees.
//!
//! Nothing here evaluates. Each builder moves its operands into a new node
//! and returns it; operands are `Copy`, so the caller's expressions remain
//! usable afterwards.

use super::{BinaryOp, Constant, Expr, Node, Placeholder, UnaryOp};
use crate::ops::{AbsOp, AddOp, BinaryOperator, MaxOp, MinOp, MulOp, SqrtOp, SubOp, UnaryOperator};
use std::ops::{Add, Mul, Sub};

/// The first input (slot 0).
pub const X: Expr<Placeholder<0>> = Expr(Placeholder);

/// The second input (slot 1). Only usable with two-input calls.
pub const Y: Expr<Placeholder<1>> = Expr(Placeholder);

// =============================================================================
// Operands - pairing an expression with an expression or a literal
// =============================================================================

/// A valid left/right operand pair for a binary builder.
///
/// Implemented for `Expr op Expr`, `Expr op f32` and `f32 op Expr`. A literal
/// is promoted to a [`Constant`] in the position it was written.
pub trait Operands<Rhs> {
    type Left: Node;
    type Right: Node;

    fn into_nodes(self, rhs: Rhs) -> (Self::Left, Self::Right);
}

impl<L: Node, R: Node> Operands<Expr<R>> for Expr<L> {
    type Left = L;
    type Right = R;

    #[inline]
    fn into_nodes(self, rhs: Expr<R>) -> (L, R) {
        (self.0, rhs.0)
    }
}

impl<L: Node> Operands<f32> for Expr<L> {
    type Left = L;
    type Right = Constant;

    #[inline]
    fn into_nodes(self, rhs: f32) -> (L, Constant) {
        (self.0, Constant(rhs))
    }
}

impl<R: Node> Operands<Expr<R>> for f32 {
    type Left = Constant;
    type Right = R;

    #[inline]
    fn into_nodes(self, rhs: Expr<R>) -> (Constant, R) {
        (Constant(self), rhs.0)
    }
}

/// The expression type produced by combining `A` and `B` with `Op`.
pub type Composed<A, B, Op> =
    Expr<BinaryOp<<A as Operands<B>>::Left, <A as Operands<B>>::Right, Op>>;

#[inline]
fn compose<A, B, Op>(lhs: A, rhs: B) -> Composed<A, B, Op>
where
    A: Operands<B>,
    Op: BinaryOperator,
{
    let (left, right) = lhs.into_nodes(rhs);
    Expr(BinaryOp::new(left, right))
}

#[inline]
fn wrap<E: Node, Op: UnaryOperator>(operand: Expr<E>) -> Expr<UnaryOp<E, Op>> {
    Expr(UnaryOp::new(operand.0))
}

// ===== Macro for generating operator implementations =====
// `Expr op (Expr | f32)` goes through one impl on `Expr`; `f32 op Expr` needs
// its own impl on `f32`.

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident => $op:ty;)*) => {
        $(
            impl<E: Node, Rhs> $trait<Rhs> for Expr<E>
            where
                Expr<E>: Operands<Rhs>,
            {
                type Output = Composed<Expr<E>, Rhs, $op>;

                #[inline]
                fn $method(self, rhs: Rhs) -> Self::Output {
                    compose(self, rhs)
                }
            }

            impl<E: Node> $trait<Expr<E>> for f32 {
                type Output = Composed<f32, Expr<E>, $op>;

                #[inline]
                fn $method(self, rhs: Expr<E>) -> Self::Output {
                    compose(self, rhs)
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add => AddOp;
    Sub, sub => SubOp;
    Mul, mul => MulOp;
}

// =============================================================================
// Function-style builders
// =============================================================================

/// Elementwise maximum. Either side may be a literal.
///
/// ```
/// use vectorize::{X, max};
/// assert_eq!(max(X, 2.0).evaluate((1.0_f32,)), 2.0);
/// ```
#[inline]
pub fn max<A: Operands<B>, B>(lhs: A, rhs: B) -> Composed<A, B, MaxOp> {
    compose(lhs, rhs)
}

/// Elementwise minimum. Either side may be a literal.
#[inline]
pub fn min<A: Operands<B>, B>(lhs: A, rhs: B) -> Composed<A, B, MinOp> {
    compose(lhs, rhs)
}

/// Elementwise magnitude (sign bit cleared).
#[inline]
pub fn abs<E: Node>(operand: Expr<E>) -> Expr<UnaryOp<E, AbsOp>> {
    wrap(operand)
}

/// Elementwise square root. Negative elements give NaN.
#[inline]
pub fn sqrt<E: Node>(operand: Expr<E>) -> Expr<UnaryOp<E, SqrtOp>> {
    wrap(operand)
}

// ===== Expr Methods =====

impl<E: Node> Expr<E> {
    /// Method form of [`max()`]: `X.max(Y)`, `X.max(0.0)`.
    #[inline]
    pub fn max<Rhs>(self, rhs: Rhs) -> Composed<Self, Rhs, MaxOp>
    where
        Self: Operands<Rhs>,
    {
        compose(self, rhs)
    }

    /// Method form of [`min()`].
    #[inline]
    pub fn min<Rhs>(self, rhs: Rhs) -> Composed<Self, Rhs, MinOp>
    where
        Self: Operands<Rhs>,
    {
        compose(self, rhs)
    }

    /// Method form of [`abs()`].
    #[inline]
    pub fn abs(self) -> Expr<UnaryOp<E, AbsOp>> {
        wrap(self)
    }

    /// Method form of [`sqrt()`].
    #[inline]
    pub fn sqrt(self) -> Expr<UnaryOp<E, SqrtOp>> {
        wrap(self)
    }
}
