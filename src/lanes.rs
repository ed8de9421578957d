//! Lane groups: the vector arithmetic capability the engine is written against.
//!
//! A [`Lanes`] value is `WIDTH` independent `f32` lanes. Two implementations
//! exist:
//!
//! | Type | Width | Role |
//! |------|-------|------|
//! | [`Batch`] (`wide::f32x4`) | 4 | batch path |
//! | `f32` | 1 | tail path and full scalar fallback |
//!
//! `wide` picks SSE, NEON or WASM `simd128` at compile time and falls back to
//! plain arrays when none is available, so the batch path is always
//! compilable. Every operation here must agree lane-for-lane with its `f32`
//! counterpart; the tail loop relies on it.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};
use wide::{CmpGt, CmpLt, f32x4};

/// The hardware-width batch type.
pub type Batch = f32x4;

/// Native vector width for `f32` elements.
pub const WIDTH: usize = 4;

/// A group of `f32` lanes with elementwise arithmetic.
///
/// `max`/`min` follow one NaN policy on every implementation: a single NaN
/// operand is ignored and the other operand is returned; two NaNs give NaN.
/// When neither operand wins the comparison (equal values, `0.0` vs `-0.0`)
/// the right operand is returned.
pub trait Lanes:
    Copy + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Send + Sync + 'static
{
    /// Number of lanes.
    const WIDTH: usize;

    /// Broadcast `value` into every lane.
    fn splat(value: f32) -> Self;

    /// Load the first `WIDTH` elements of `src`.
    ///
    /// # Panics
    ///
    /// If `src.len() < WIDTH`.
    fn load(src: &[f32]) -> Self;

    /// Store every lane into the first `WIDTH` elements of `dst`.
    ///
    /// # Panics
    ///
    /// If `dst.len() < WIDTH`.
    fn store(self, dst: &mut [f32]);

    /// Lane-wise maximum under the NaN policy above.
    fn max(self, other: Self) -> Self;

    /// Lane-wise minimum under the NaN policy above.
    fn min(self, other: Self) -> Self;

    /// Clear the sign bit of every lane.
    fn abs(self) -> Self;

    /// IEEE square root; negative lanes become NaN.
    fn sqrt(self) -> Self;
}

impl Lanes for f32 {
    const WIDTH: usize = 1;

    #[inline]
    fn splat(value: f32) -> Self {
        value
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        src[0]
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        dst[0] = self;
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        if self.is_nan() {
            other
        } else if other.is_nan() || self > other {
            self
        } else {
            other
        }
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        if self.is_nan() {
            other
        } else if other.is_nan() || self < other {
            self
        } else {
            other
        }
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }
}

impl Lanes for f32x4 {
    const WIDTH: usize = WIDTH;

    #[inline]
    fn splat(value: f32) -> Self {
        f32x4::splat(value)
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        f32x4::new([src[0], src[1], src[2], src[3]])
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        dst[..WIDTH].copy_from_slice(&self.to_array());
    }

    // Compare-and-select rather than `f32x4::max`, so the tie and NaN choices
    // are exactly the scalar ones above on every `wide` backend.
    #[inline]
    fn max(self, other: Self) -> Self {
        let picked = (other.is_nan() | self.cmp_gt(other)).blend(self, other);
        self.is_nan().blend(other, picked)
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        let picked = (other.is_nan() | self.cmp_lt(other)).blend(self, other);
        self.is_nan().blend(other, picked)
    }

    #[inline]
    fn abs(self) -> Self {
        f32x4::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32x4::sqrt(self)
    }
}
