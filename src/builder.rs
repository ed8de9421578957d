//! Builder API for running expressions over buffers
//!
//! [`Vectorizer`] carries the execution settings; the crate-level
//! [`apply`](crate::apply) family uses `Vectorizer::default()`.
//!
//! # Example
//! ```
//! use vectorize::{Vectorizer, X, sqrt};
//!
//! let src = [1.0, 4.0, 9.0, 16.0, 25.0];
//! let mut dst = [0.0; 5];
//! Vectorizer::new()
//!     .simd(false)
//!     .apply(src.len(), &src, &mut dst, sqrt(X))?;
//! assert_eq!(dst, [1.0, 2.0, 3.0, 4.0, 5.0]);
//! # Ok::<(), vectorize::VectorizeError>(())
//! ```

use crate::engine;
use crate::error::{Operand, Result, VectorizeError};
use crate::expr::{Expr, Node, OneInput, TwoInput};
use crate::lanes::{Batch, WIDTH};

/// Default minimum element count for parallel execution.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;
/// Default elements per parallel task.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Execution settings for `apply`/`apply2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vectorizer {
    simd: bool,
    parallel: bool,
    parallel_threshold: usize,
    chunk_size: usize,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Vectorizer {
            simd: true,
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Vectorizer {
    /// Create a builder with default settings (SIMD on, sequential).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the 4-wide batch path.
    ///
    /// With SIMD disabled every element goes through the scalar path. Output
    /// is bit-identical either way.
    pub fn simd(mut self, enabled: bool) -> Self {
        self.simd = enabled;
        self
    }

    /// Split large buffers across the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Minimum element count before parallel execution kicks in.
    #[cfg(feature = "parallel")]
    pub fn parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    /// Elements per parallel task, rounded up to a multiple of the batch width.
    ///
    /// Sizes beyond the largest representable multiple of the width are
    /// clamped to it.
    #[cfg(feature = "parallel")]
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size
            .clamp(1, usize::MAX / WIDTH * WIDTH)
            .next_multiple_of(WIDTH);
        self
    }

    pub fn is_simd(&self) -> bool {
        self.simd
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Minimum element count for parallel execution.
    pub fn parallel_min_len(&self) -> usize {
        self.parallel_threshold
    }

    /// Elements per parallel task.
    pub fn chunk_len(&self) -> usize {
        self.chunk_size
    }

    /// `dst[i] = expr(src[i])` for `i` in `0..n`.
    ///
    /// # Errors
    ///
    /// - `InputTooShort` if `src.len() < n`
    /// - `OutputTooShort` if `dst.len() < n`
    ///
    /// Nothing is written when an error is returned.
    pub fn apply<E: OneInput>(
        &self,
        n: usize,
        src: &[f32],
        dst: &mut [f32],
        expr: Expr<E>,
    ) -> Result<()> {
        VectorizeError::check_input(Operand::First, n, src.len())?;
        VectorizeError::check_output(n, dst.len())?;
        self.trace("apply", n, &expr);

        let (src, dst) = (&src[..n], &mut dst[..n]);

        #[cfg(feature = "parallel")]
        if self.use_parallel(n) {
            crate::parallel::map1(self, src, dst, expr.node());
            return Ok(());
        }

        self.map1(src, dst, expr.node());
        Ok(())
    }

    /// `buf[i] = expr(buf[i])` for `i` in `0..n`.
    ///
    /// # Errors
    ///
    /// `InputTooShort` if `buf.len() < n`.
    pub fn apply_in_place<E: OneInput>(&self, n: usize, buf: &mut [f32], expr: Expr<E>) -> Result<()> {
        VectorizeError::check_input(Operand::First, n, buf.len())?;
        self.trace("apply_in_place", n, &expr);

        let buf = &mut buf[..n];

        #[cfg(feature = "parallel")]
        if self.use_parallel(n) {
            crate::parallel::map1_in_place(self, buf, expr.node());
            return Ok(());
        }

        self.map1_in_place(buf, expr.node());
        Ok(())
    }

    /// `dst[i] = expr(src1[i], src2[i])` for `i` in `0..n`.
    ///
    /// # Errors
    ///
    /// - `InputTooShort` if `src1` or `src2` is shorter than `n`
    /// - `OutputTooShort` if `dst.len() < n`
    pub fn apply2<E: TwoInput>(
        &self,
        n: usize,
        src1: &[f32],
        src2: &[f32],
        dst: &mut [f32],
        expr: Expr<E>,
    ) -> Result<()> {
        VectorizeError::check_input(Operand::First, n, src1.len())?;
        VectorizeError::check_input(Operand::Second, n, src2.len())?;
        VectorizeError::check_output(n, dst.len())?;
        self.trace("apply2", n, &expr);

        let (src1, src2, dst) = (&src1[..n], &src2[..n], &mut dst[..n]);

        #[cfg(feature = "parallel")]
        if self.use_parallel(n) {
            crate::parallel::map2(self, src1, src2, dst, expr.node());
            return Ok(());
        }

        self.map2(src1, src2, dst, expr.node());
        Ok(())
    }

    /// `buf[i] = expr(buf[i], src2[i])` for `i` in `0..n`.
    ///
    /// # Errors
    ///
    /// `InputTooShort` if `buf` or `src2` is shorter than `n`.
    pub fn apply2_in_place<E: TwoInput>(
        &self,
        n: usize,
        buf: &mut [f32],
        src2: &[f32],
        expr: Expr<E>,
    ) -> Result<()> {
        VectorizeError::check_input(Operand::First, n, buf.len())?;
        VectorizeError::check_input(Operand::Second, n, src2.len())?;
        self.trace("apply2_in_place", n, &expr);

        let (buf, src2) = (&mut buf[..n], &src2[..n]);

        #[cfg(feature = "parallel")]
        if self.use_parallel(n) {
            crate::parallel::map2_in_place(self, buf, src2, expr.node());
            return Ok(());
        }

        self.map2_in_place(buf, src2, expr.node());
        Ok(())
    }

    // ===== Sequential dispatch on the SIMD setting =====

    pub(crate) fn map1<E: OneInput>(&self, src: &[f32], dst: &mut [f32], node: &E) {
        if self.simd {
            engine::map1::<Batch, E>(src, dst, node);
        } else {
            engine::map1::<f32, E>(src, dst, node);
        }
    }

    pub(crate) fn map1_in_place<E: OneInput>(&self, buf: &mut [f32], node: &E) {
        if self.simd {
            engine::map1_in_place::<Batch, E>(buf, node);
        } else {
            engine::map1_in_place::<f32, E>(buf, node);
        }
    }

    pub(crate) fn map2<E: TwoInput>(&self, src1: &[f32], src2: &[f32], dst: &mut [f32], node: &E) {
        if self.simd {
            engine::map2::<Batch, E>(src1, src2, dst, node);
        } else {
            engine::map2::<f32, E>(src1, src2, dst, node);
        }
    }

    pub(crate) fn map2_in_place<E: TwoInput>(&self, buf: &mut [f32], src2: &[f32], node: &E) {
        if self.simd {
            engine::map2_in_place::<Batch, E>(buf, src2, node);
        } else {
            engine::map2_in_place::<f32, E>(buf, src2, node);
        }
    }

    #[cfg(feature = "parallel")]
    fn use_parallel(&self, n: usize) -> bool {
        if !self.parallel {
            return false;
        }
        if n < self.parallel_threshold {
            log::debug!(
                "parallel requested for {n} elements, below threshold {}; running sequentially",
                self.parallel_threshold
            );
            return false;
        }
        true
    }

    fn trace<E: Node>(&self, entry: &str, n: usize, expr: &Expr<E>) {
        let width = if self.simd { WIDTH } else { 1 };
        log::trace!(
            "{entry}: `{expr}` over {n} elements ({} batches of {width}, {} tail)",
            n / width,
            n % width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{X, Y, max, sqrt};

    #[test]
    fn test_defaults() {
        let v = Vectorizer::new();
        assert!(v.is_simd());
        assert!(!v.is_parallel());
        assert_eq!(v.chunk_len(), DEFAULT_CHUNK_SIZE);
        assert_eq!(v.parallel_min_len(), DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(v, Vectorizer::default());
    }

    #[test]
    fn test_simd_and_scalar_paths_match() {
        let src: Vec<f32> = (0..23).map(|i| (i as f32 - 11.0) * 0.75).collect();
        let other: Vec<f32> = (0..23).map(|i| i as f32 * 1.5 - 4.0).collect();
        let expr = sqrt(max(X, Y) * X + 2.0).abs() - Y;

        let mut simd = vec![0.0; 23];
        let mut scalar = vec![0.0; 23];
        Vectorizer::new().apply2(23, &src, &other, &mut simd, expr).unwrap();
        Vectorizer::new()
            .simd(false)
            .apply2(23, &src, &other, &mut scalar, expr)
            .unwrap();

        for (i, (a, b)) in simd.iter().zip(&scalar).enumerate() {
            if a.is_nan() {
                assert!(b.is_nan(), "index {i}: NaN vs {b}");
            } else {
                assert_eq!(a.to_bits(), b.to_bits(), "index {i}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_short_buffers_rejected_before_writing() {
        let src = [1.0; 3];
        let mut dst = [-1.0; 8];
        let err = Vectorizer::new().apply(5, &src, &mut dst, X + 1.0).unwrap_err();
        assert_eq!(
            err,
            VectorizeError::InputTooShort {
                operand: Operand::First,
                needed: 5,
                got: 3
            }
        );
        assert!(dst.iter().all(|&v| v == -1.0));

        let err = Vectorizer::new()
            .apply2(4, &dst, &src, &mut [0.0; 4], X + Y)
            .unwrap_err();
        assert!(matches!(
            err,
            VectorizeError::InputTooShort {
                operand: Operand::Second,
                ..
            }
        ));

        let mut small = [0.0; 2];
        let err = Vectorizer::new().apply(3, &src, &mut small, X).unwrap_err();
        assert_eq!(err, VectorizeError::OutputTooShort { needed: 3, got: 2 });
        assert_eq!(small, [0.0, 0.0]);
    }

    #[test]
    fn test_only_first_n_elements_touched() {
        let src = [4.0, 9.0, 16.0, 25.0, 36.0, 49.0];
        let mut dst = [0.0; 6];
        Vectorizer::new().apply(5, &src, &mut dst, sqrt(X)).unwrap();
        assert_eq!(dst, [2.0, 3.0, 4.0, 5.0, 6.0, 0.0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_chunk_size_rounds_to_width() {
        assert_eq!(Vectorizer::new().chunk_size(10).chunk_len(), 12);
        assert_eq!(Vectorizer::new().chunk_size(0).chunk_len(), WIDTH);
        assert_eq!(Vectorizer::new().chunk_size(64).chunk_len(), 64);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_chunk_size_saturates_near_usize_max() {
        let largest = usize::MAX / WIDTH * WIDTH;
        assert_eq!(Vectorizer::new().chunk_size(usize::MAX).chunk_len(), largest);
        assert_eq!(Vectorizer::new().chunk_size(largest + 1).chunk_len(), largest);
        assert_eq!(Vectorizer::new().chunk_size(largest).chunk_len(), largest);
    }
}
