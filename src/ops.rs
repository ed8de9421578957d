//! Operator table.
//!
//! Each operator is a zero-sized marker type. Its `eval` is generic over
//! [`Lanes`], so one definition serves both the batch (`f32x4`) and the
//! tail (`f32`) instantiation; there is no separate scalar code to drift.

use crate::lanes::Lanes;
use std::fmt::Debug;

/// A pointwise binary operator.
pub trait BinaryOperator: Copy + Default + Debug + Send + Sync + 'static {
    /// Symbol used by `Display` for expressions.
    const SYMBOL: &'static str;
    /// Whether `Display` renders the operator infix (`a + b`) or as a call (`max(a, b)`).
    const INFIX: bool;

    fn eval<L: Lanes>(x: L, y: L) -> L;
}

/// A pointwise unary operator.
pub trait UnaryOperator: Copy + Default + Debug + Send + Sync + 'static {
    const NAME: &'static str;

    fn eval<L: Lanes>(x: L) -> L;
}

// ===== Macro for generating operator marker types =====

macro_rules! binary_operators {
    ($($name:ident => $symbol:literal, $infix:literal, |$x:ident, $y:ident| $body:expr;)*) => {
        $(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl BinaryOperator for $name {
                const SYMBOL: &'static str = $symbol;
                const INFIX: bool = $infix;

                #[inline]
                fn eval<L: Lanes>($x: L, $y: L) -> L {
                    $body
                }
            }
        )*
    };
}

macro_rules! unary_operators {
    ($($name:ident => $fn_name:literal, |$x:ident| $body:expr;)*) => {
        $(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl UnaryOperator for $name {
                const NAME: &'static str = $fn_name;

                #[inline]
                fn eval<L: Lanes>($x: L) -> L {
                    $body
                }
            }
        )*
    };
}

binary_operators! {
    AddOp => "+", true, |x, y| x + y;
    SubOp => "-", true, |x, y| x - y;
    MulOp => "*", true, |x, y| x * y;
    MaxOp => "max", false, |x, y| Lanes::max(x, y);
    MinOp => "min", false, |x, y| Lanes::min(x, y);
}

unary_operators! {
    AbsOp => "abs", |x| Lanes::abs(x);
    SqrtOp => "sqrt", |x| Lanes::sqrt(x);
}
