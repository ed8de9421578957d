use std::fmt;
use thiserror::Error;

/// Which buffer argument an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `src` of a one-input call, or `src1` of a two-input call.
    First,
    /// `src2` of a two-input call.
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::First => write!(f, "first input"),
            Operand::Second => write!(f, "second input"),
        }
    }
}

/// Errors reported by the evaluation engine.
///
/// Arity mismatches never show up here; they are rejected by the type
/// checker. Domain errors such as `sqrt(-1)` are not errors either and come
/// back as NaN in the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorizeError {
    /// An input slice holds fewer than `n` elements.
    #[error("{operand} holds {got} elements, but {needed} were requested")]
    InputTooShort {
        operand: Operand,
        needed: usize,
        got: usize,
    },

    /// The destination slice holds fewer than `n` elements.
    #[error("output holds {got} elements, but {needed} were requested")]
    OutputTooShort { needed: usize, got: usize },
}

impl VectorizeError {
    /// Check that an input of length `got` covers `needed` elements.
    pub(crate) fn check_input(operand: Operand, needed: usize, got: usize) -> Result<()> {
        if got < needed {
            Err(VectorizeError::InputTooShort {
                operand,
                needed,
                got,
            })
        } else {
            Ok(())
        }
    }

    /// Check that an output of length `got` covers `needed` elements.
    pub(crate) fn check_output(needed: usize, got: usize) -> Result<()> {
        if got < needed {
            Err(VectorizeError::OutputTooShort { needed, got })
        } else {
            Ok(())
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VectorizeError>;
