//! Batch/tail evaluation kernels.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  src:  [e0 e1 e2 e3 | e4 e5 e6 e7 | ... | e64]       │
//! │         └─ batch ─┘   └─ batch ─┘         └tail┘     │
//! │          B::WIDTH      B::WIDTH           < WIDTH    │
//! │                                                      │
//! │  batch: expr.evaluate((B::load(chunk),)).store(out)  │
//! │  tail:  expr.evaluate((x,)) per element              │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every kernel is generic over the batch type `B`. With `B = f32x4` this is
//! the SIMD path; with `B = f32` the batch loop covers everything and the
//! tail is empty, which is the scalar fallback. Both loops evaluate the same
//! node, so a tail element gets exactly the value a batch lane would have.
//!
//! Callers slice every buffer to the same length `n` before calling in.

use crate::expr::Evaluate;
use crate::lanes::Lanes;

/// `dst[i] = expr(src[i])`.
#[inline]
pub(crate) fn map1<B, E>(src: &[f32], dst: &mut [f32], expr: &E)
where
    B: Lanes,
    E: Evaluate<(B,)> + Evaluate<(f32,)>,
{
    debug_assert_eq!(src.len(), dst.len());

    let mut src_batches = src.chunks_exact(B::WIDTH);
    let mut dst_batches = dst.chunks_exact_mut(B::WIDTH);
    for (s, d) in (&mut src_batches).zip(&mut dst_batches) {
        expr.evaluate((B::load(s),)).store(d);
    }

    for (s, d) in src_batches
        .remainder()
        .iter()
        .zip(dst_batches.into_remainder())
    {
        *d = expr.evaluate((*s,));
    }
}

/// `buf[i] = expr(buf[i])`. Each batch is loaded before it is overwritten.
#[inline]
pub(crate) fn map1_in_place<B, E>(buf: &mut [f32], expr: &E)
where
    B: Lanes,
    E: Evaluate<(B,)> + Evaluate<(f32,)>,
{
    let mut batches = buf.chunks_exact_mut(B::WIDTH);
    for chunk in &mut batches {
        let value = expr.evaluate((B::load(chunk),));
        value.store(chunk);
    }

    for x in batches.into_remainder() {
        *x = expr.evaluate((*x,));
    }
}

/// `dst[i] = expr(src1[i], src2[i])`.
#[inline]
pub(crate) fn map2<B, E>(src1: &[f32], src2: &[f32], dst: &mut [f32], expr: &E)
where
    B: Lanes,
    E: Evaluate<(B, B)> + Evaluate<(f32, f32)>,
{
    debug_assert_eq!(src1.len(), dst.len());
    debug_assert_eq!(src2.len(), dst.len());

    let mut first = src1.chunks_exact(B::WIDTH);
    let mut second = src2.chunks_exact(B::WIDTH);
    let mut out = dst.chunks_exact_mut(B::WIDTH);
    for ((a, b), d) in (&mut first).zip(&mut second).zip(&mut out) {
        expr.evaluate((B::load(a), B::load(b))).store(d);
    }

    for ((a, b), d) in first
        .remainder()
        .iter()
        .zip(second.remainder())
        .zip(out.into_remainder())
    {
        *d = expr.evaluate((*a, *b));
    }
}

/// `buf[i] = expr(buf[i], src2[i])`.
#[inline]
pub(crate) fn map2_in_place<B, E>(buf: &mut [f32], src2: &[f32], expr: &E)
where
    B: Lanes,
    E: Evaluate<(B, B)> + Evaluate<(f32, f32)>,
{
    debug_assert_eq!(src2.len(), buf.len());

    let mut second = src2.chunks_exact(B::WIDTH);
    let mut batches = buf.chunks_exact_mut(B::WIDTH);
    for (chunk, b) in (&mut batches).zip(&mut second) {
        let value = expr.evaluate((B::load(chunk), B::load(b)));
        value.store(chunk);
    }

    for (x, b) in batches.into_remainder().iter_mut().zip(second.remainder()) {
        *x = expr.evaluate((*x, *b));
    }
}
