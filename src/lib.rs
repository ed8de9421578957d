//! Composable elementwise expressions over `f32` buffers.
//!
//! Build a pointwise computation from the inputs [`X`] and [`Y`], literals,
//! and the operators `+ - *`, [`max`], [`min`], [`abs`] and [`sqrt`], then run
//! it over whole buffers with [`apply`] or [`apply2`].
//!
//! # Features
//! - **Zero-cost composition**: an expression is a nested generic type, built
//!   without evaluating anything and monomorphized per shape
//! - **4-wide batches** via `wide::f32x4`, scalar evaluation for the tail
//! - **Bit-identical paths**: the batch and tail loops evaluate the same tree
//! - **Compile-time arity checks**: `Y` cannot be used with one-input calls
//! - **In-place transforms** with [`apply_in_place`] / [`apply2_in_place`]
//! - Optional Rayon parallelism (`parallel` feature)
//!
//! # Usage Examples
//!
//! ```
//! use vectorize::{X, Y, apply, apply2, sqrt};
//!
//! let a = [1.0, 4.0, 9.0, 16.0, 25.0];
//! let b = [10.0, 20.0, 30.0, 40.0, 50.0];
//! let mut out = [0.0; 5];
//!
//! apply(a.len(), &a, &mut out, sqrt(X))?;
//! assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 5.0]);
//!
//! apply2(a.len(), &a, &b, &mut out, X + Y)?;
//! assert_eq!(out, [11.0, 24.0, 39.0, 56.0, 75.0]);
//! # Ok::<(), vectorize::VectorizeError>(())
//! ```
//!
//! Arity is checked by the type system. A one-input call cannot read `Y`:
//!
//! ```compile_fail
//! use vectorize::{X, Y, apply};
//!
//! let src = [1.0_f32; 8];
//! let mut dst = [0.0_f32; 8];
//! apply(8, &src, &mut dst, X + Y).unwrap();
//! ```
//!
//! # NaN handling
//! Domain errors are not reported; `sqrt` of a negative number is NaN. `max`
//! and `min` ignore a single NaN operand and return the other one, on both
//! the batch and the tail path.

mod builder;
mod engine;
mod error;
pub mod expr;
pub mod lanes;
pub mod ops;

#[cfg(feature = "parallel")]
mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use builder::{DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD, Vectorizer};
pub use error::{Operand, Result, VectorizeError};
pub use expr::{Expr, OneInput, TwoInput, X, Y, abs, max, min, sqrt};
pub use lanes::WIDTH;

/// Evaluate a one-input expression over `src`, writing `dst`.
///
/// For `i` in `0..n`, `dst[i] = expr(src[i])`. Full batches of [`WIDTH`]
/// elements are evaluated as vectors; the remaining `n % WIDTH` elements are
/// evaluated one at a time with the same expression.
///
/// # Errors
///
/// `InputTooShort` or `OutputTooShort` if a slice holds fewer than `n`
/// elements. Nothing is written in that case.
///
/// # Example
/// ```
/// use vectorize::{X, apply, max};
///
/// let src = [-2.0, 0.5, 3.0];
/// let mut dst = [0.0; 3];
/// apply(3, &src, &mut dst, max(X, 0.0))?;
/// assert_eq!(dst, [0.0, 0.5, 3.0]);
/// # Ok::<(), vectorize::VectorizeError>(())
/// ```
pub fn apply<E: OneInput>(n: usize, src: &[f32], dst: &mut [f32], expr: Expr<E>) -> Result<()> {
    Vectorizer::default().apply(n, src, dst, expr)
}

/// Evaluate a two-input expression over `src1` and `src2`, writing `dst`.
///
/// For `i` in `0..n`, `dst[i] = expr(src1[i], src2[i])`.
///
/// # Errors
///
/// `InputTooShort` or `OutputTooShort` if a slice holds fewer than `n`
/// elements.
pub fn apply2<E: TwoInput>(
    n: usize,
    src1: &[f32],
    src2: &[f32],
    dst: &mut [f32],
    expr: Expr<E>,
) -> Result<()> {
    Vectorizer::default().apply2(n, src1, src2, dst, expr)
}

/// [`apply`] with the destination aliasing the source.
///
/// # Errors
///
/// `InputTooShort` if `buf.len() < n`.
///
/// # Example
/// ```
/// use vectorize::{X, apply_in_place};
///
/// let mut values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// apply_in_place(5, &mut values, X * X)?;
/// assert_eq!(values, [1.0, 4.0, 9.0, 16.0, 25.0]);
/// # Ok::<(), vectorize::VectorizeError>(())
/// ```
pub fn apply_in_place<E: OneInput>(n: usize, buf: &mut [f32], expr: Expr<E>) -> Result<()> {
    Vectorizer::default().apply_in_place(n, buf, expr)
}

/// [`apply2`] with the destination aliasing the first source.
///
/// # Errors
///
/// `InputTooShort` if `buf` or `src2` holds fewer than `n` elements.
pub fn apply2_in_place<E: TwoInput>(
    n: usize,
    buf: &mut [f32],
    src2: &[f32],
    expr: Expr<E>,
) -> Result<()> {
    Vectorizer::default().apply2_in_place(n, buf, src2, expr)
}
