// Display formatting for expression nodes
use super::{BinaryOp, Constant, Node, Placeholder, UnaryOp};
use crate::ops::{BinaryOperator, UnaryOperator};
use std::fmt;

impl<const N: usize> fmt::Display for Placeholder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match N {
            0 => write!(f, "x"),
            1 => write!(f, "y"),
            n => write!(f, "x{n}"),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        if n.is_nan() {
            write!(f, "NaN")
        } else if n.is_infinite() {
            if n > 0.0 {
                write!(f, "Infinity")
            } else {
                write!(f, "-Infinity")
            }
        } else {
            write!(f, "{n}")
        }
    }
}

/// Render an infix operand, parenthesized when it is itself infix.
fn operand<T: Node>(f: &mut fmt::Formatter<'_>, node: &T) -> fmt::Result {
    if T::INFIX {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

impl<L: Node, R: Node, Op: BinaryOperator> fmt::Display for BinaryOp<L, R, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if Op::INFIX {
            operand(f, self.left())?;
            write!(f, " {} ", Op::SYMBOL)?;
            operand(f, self.right())
        } else {
            write!(f, "{}({}, {})", Op::SYMBOL, self.left(), self.right())
        }
    }
}

impl<T: Node, Op: UnaryOperator> fmt::Display for UnaryOp<T, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Op::NAME, self.operand())
    }
}
