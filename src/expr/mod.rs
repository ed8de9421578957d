//! Expression trees for elementwise computations.
//!
//! This module defines:
//! - [`Expr`] - the user-facing wrapper that composition operators act on
//! - The four node variants: [`Placeholder`], [`Constant`], [`BinaryOp`], [`UnaryOp`]
//! - [`Evaluate`] - evaluation of a node against a tuple of input lanes
//!
//! # Architecture
//!
//! Every composed expression is its own type. `sqrt(X + Y)` is
//! `Expr<UnaryOp<BinaryOp<Placeholder<0>, Placeholder<1>, AddOp>, SqrtOp>>`,
//! so the compiler monomorphizes one evaluation routine per expression shape
//! with no dynamic dispatch and no allocation.
//!
//! ## One tree, two widths
//! [`Evaluate`] is generic over the input tuple, and the tuple is generic over
//! its [`Lanes`] type. The engine instantiates the same tree with `(f32x4,)`
//! for full batches and with `(f32,)` for the tail.
//!
//! ## Arity at the type level
//! `Placeholder<N>` only implements [`Evaluate`] for input tuples that have a
//! slot `N` (see [`Slot`]). Handing the second input `Y` to the one-input
//! engine is therefore a compile error, not a runtime check.
//!
//! # Usage
//!
//! ```
//! use vectorize::{X, Y, sqrt};
//!
//! let expr = sqrt(X * X + Y * Y);
//! assert_eq!(expr.evaluate((3.0_f32, 4.0_f32)), 5.0);
//! assert_eq!(expr.arity(), 2);
//! ```

mod compose;
mod display;

pub use compose::{Composed, Operands, X, Y, abs, max, min, sqrt};

use crate::lanes::{Batch, Lanes};
use crate::ops::{BinaryOperator, UnaryOperator};
use std::fmt;

// =============================================================================
// Input tuples
// =============================================================================

/// An ordered, fixed-length tuple of input values of one lane type.
pub trait Inputs: Copy {
    type Lane: Lanes;
    /// Number of input slots.
    const SLOTS: usize;
}

impl<L: Lanes> Inputs for (L,) {
    type Lane = L;
    const SLOTS: usize = 1;
}

impl<L: Lanes> Inputs for (L, L) {
    type Lane = L;
    const SLOTS: usize = 2;
}

/// Access to input slot `N`. Only implemented where slot `N` exists.
#[diagnostic::on_unimplemented(
    message = "expression reads an input slot that `{Self}` does not supply",
    label = "this placeholder is out of range for the inputs of this call",
    note = "`X` is input slot 0 and `Y` is input slot 1; use `apply2` for two-input expressions"
)]
pub trait Slot<const N: usize>: Inputs {
    fn slot(self) -> Self::Lane;
}

impl<L: Lanes> Slot<0> for (L,) {
    #[inline]
    fn slot(self) -> L {
        self.0
    }
}

impl<L: Lanes> Slot<0> for (L, L) {
    #[inline]
    fn slot(self) -> L {
        self.0
    }
}

impl<L: Lanes> Slot<1> for (L, L) {
    #[inline]
    fn slot(self) -> L {
        self.1
    }
}

// =============================================================================
// Node variants
// =============================================================================

/// Structural information shared by every node.
pub trait Node: Copy + fmt::Debug + fmt::Display + Send + Sync {
    /// Highest placeholder index referenced, plus one. Zero for constant trees.
    const ARITY: usize;
    /// Number of nodes in the tree.
    const SIZE: usize;
    /// Whether `Display` renders this node as an infix operation.
    const INFIX: bool = false;
}

/// Evaluation of a node against one input tuple.
///
/// Implementations are pure: the result depends only on `inputs`.
pub trait Evaluate<I: Inputs>: Node {
    fn evaluate(&self, inputs: I) -> I::Lane;
}

/// Expressions the one-input engine accepts: evaluable on `(f32,)` and `(f32x4,)`.
pub trait OneInput: Evaluate<(f32,)> + Evaluate<(Batch,)> {}

impl<E> OneInput for E where E: Evaluate<(f32,)> + Evaluate<(Batch,)> {}

/// Expressions the two-input engine accepts.
pub trait TwoInput: Evaluate<(f32, f32)> + Evaluate<(Batch, Batch)> {}

impl<E> TwoInput for E where E: Evaluate<(f32, f32)> + Evaluate<(Batch, Batch)> {}

const fn max_arity(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

/// Identity read of input slot `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholder<const N: usize>;

impl<const N: usize> Node for Placeholder<N> {
    const ARITY: usize = N + 1;
    const SIZE: usize = 1;
}

impl<const N: usize, I: Slot<N>> Evaluate<I> for Placeholder<N> {
    #[inline]
    fn evaluate(&self, inputs: I) -> I::Lane {
        inputs.slot()
    }
}

/// A literal value, broadcast to every lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f32);

impl Constant {
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Node for Constant {
    const ARITY: usize = 0;
    const SIZE: usize = 1;
}

impl<I: Inputs> Evaluate<I> for Constant {
    #[inline]
    fn evaluate(&self, _inputs: I) -> I::Lane {
        I::Lane::splat(self.0)
    }
}

/// `op(left, right)`; both operands see the same inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryOp<L, R, Op> {
    left: L,
    right: R,
    op: Op,
}

impl<L, R, Op: BinaryOperator> BinaryOp<L, R, Op> {
    pub fn new(left: L, right: R) -> Self {
        BinaryOp {
            left,
            right,
            op: Op::default(),
        }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }
}

impl<L: Node, R: Node, Op: BinaryOperator> Node for BinaryOp<L, R, Op> {
    const ARITY: usize = max_arity(L::ARITY, R::ARITY);
    const SIZE: usize = 1 + L::SIZE + R::SIZE;
    const INFIX: bool = Op::INFIX;
}

impl<I, L, R, Op> Evaluate<I> for BinaryOp<L, R, Op>
where
    I: Inputs,
    L: Evaluate<I>,
    R: Evaluate<I>,
    Op: BinaryOperator,
{
    #[inline]
    fn evaluate(&self, inputs: I) -> I::Lane {
        Op::eval(self.left.evaluate(inputs), self.right.evaluate(inputs))
    }
}

/// `op(operand)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryOp<T, Op> {
    operand: T,
    op: Op,
}

impl<T, Op: UnaryOperator> UnaryOp<T, Op> {
    pub fn new(operand: T) -> Self {
        UnaryOp {
            operand,
            op: Op::default(),
        }
    }

    pub fn operand(&self) -> &T {
        &self.operand
    }
}

impl<T: Node, Op: UnaryOperator> Node for UnaryOp<T, Op> {
    const ARITY: usize = T::ARITY;
    const SIZE: usize = 1 + T::SIZE;
}

impl<I, T, Op> Evaluate<I> for UnaryOp<T, Op>
where
    I: Inputs,
    T: Evaluate<I>,
    Op: UnaryOperator,
{
    #[inline]
    fn evaluate(&self, inputs: I) -> I::Lane {
        Op::eval(self.operand.evaluate(inputs))
    }
}

// =============================================================================
// Expr - the composable wrapper
// =============================================================================

/// A composed elementwise expression.
///
/// `Expr` is plain data: building one performs no arithmetic, and the same
/// value can be evaluated any number of times with identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expr<E>(pub(crate) E);

impl<E: Node> Expr<E> {
    /// Wrap a node.
    pub const fn new(node: E) -> Self {
        Expr(node)
    }

    /// The root node of the tree.
    pub fn node(&self) -> &E {
        &self.0
    }

    /// Number of input slots this expression reads.
    pub const fn arity(&self) -> usize {
        E::ARITY
    }

    /// Number of nodes in the tree.
    pub const fn size(&self) -> usize {
        E::SIZE
    }

    /// Evaluate against one input tuple, either scalars or batches.
    ///
    /// ```
    /// use vectorize::X;
    /// let e = X * 2.0 - 1.0;
    /// assert_eq!(e.evaluate((3.0_f32,)), 5.0);
    /// ```
    #[inline]
    pub fn evaluate<I: Inputs>(&self, inputs: I) -> I::Lane
    where
        E: Evaluate<I>,
    {
        self.0.evaluate(inputs)
    }
}

impl<E: Node> fmt::Display for Expr<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
