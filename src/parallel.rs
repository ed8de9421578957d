//! Parallel execution using Rayon
//!
//! Buffers are split into chunks of [`Vectorizer::chunk_len`] elements, a
//! multiple of the batch width, and each chunk runs the sequential
//! batch/tail engine on the rayon pool. Chunk boundaries therefore never
//! split a batch, and only the final chunk can have a tail.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! vectorize = { version = "0.2", features = ["parallel"] }
//! ```

use crate::builder::Vectorizer;
use crate::expr::{OneInput, TwoInput};
use rayon::prelude::*;

pub(crate) fn map1<E: OneInput>(v: &Vectorizer, src: &[f32], dst: &mut [f32], node: &E) {
    let chunk = v.chunk_len();
    log::trace!("parallel apply: {} elements in chunks of {chunk}", dst.len());
    dst.par_chunks_mut(chunk)
        .zip(src.par_chunks(chunk))
        .for_each(|(d, s)| v.map1(s, d, node));
}

pub(crate) fn map1_in_place<E: OneInput>(v: &Vectorizer, buf: &mut [f32], node: &E) {
    let chunk = v.chunk_len();
    buf.par_chunks_mut(chunk)
        .for_each(|b| v.map1_in_place(b, node));
}

pub(crate) fn map2<E: TwoInput>(
    v: &Vectorizer,
    src1: &[f32],
    src2: &[f32],
    dst: &mut [f32],
    node: &E,
) {
    let chunk = v.chunk_len();
    log::trace!("parallel apply2: {} elements in chunks of {chunk}", dst.len());
    dst.par_chunks_mut(chunk)
        .zip(src1.par_chunks(chunk))
        .zip(src2.par_chunks(chunk))
        .for_each(|((d, a), b)| v.map2(a, b, d, node));
}

pub(crate) fn map2_in_place<E: TwoInput>(v: &Vectorizer, buf: &mut [f32], src2: &[f32], node: &E) {
    let chunk = v.chunk_len();
    buf.par_chunks_mut(chunk)
        .zip(src2.par_chunks(chunk))
        .for_each(|(b, s)| v.map2_in_place(b, s, node));
}

#[cfg(test)]
mod tests {
    use crate::{Vectorizer, X, Y, abs, min, sqrt};

    fn inputs(n: usize) -> (Vec<f32>, Vec<f32>) {
        let a = (0..n).map(|i| (i as f32 - 5000.0) * 0.125).collect();
        let b = (0..n).map(|i| ((i * 7919) % 1013) as f32 - 500.0).collect();
        (a, b)
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 10_003;
        let (a, b) = inputs(n);
        let expr = sqrt(abs(X * Y)) - min(X, 3.0);

        let mut seq = vec![0.0; n];
        let mut par = vec![0.0; n];
        Vectorizer::new().apply2(n, &a, &b, &mut seq, expr).unwrap();
        Vectorizer::new()
            .parallel(true)
            .parallel_threshold(1000)
            .chunk_size(777)
            .apply2(n, &a, &b, &mut par, expr)
            .unwrap();

        for i in 0..n {
            assert_eq!(seq[i].to_bits(), par[i].to_bits(), "index {i}");
        }
    }

    #[test]
    fn test_parallel_in_place() {
        let n = 9_001;
        let (a, b) = inputs(n);
        let mut expected = vec![0.0; n];
        Vectorizer::new().apply(n, &a, &mut expected, X * 2.0 + 1.0).unwrap();

        let mut buf = a.clone();
        Vectorizer::new()
            .parallel(true)
            .parallel_threshold(0)
            .apply_in_place(n, &mut buf, X * 2.0 + 1.0)
            .unwrap();
        assert_eq!(buf, expected);

        let mut buf2 = a.clone();
        let mut expected2 = vec![0.0; n];
        Vectorizer::new().apply2(n, &a, &b, &mut expected2, X - Y).unwrap();
        Vectorizer::new()
            .parallel(true)
            .parallel_threshold(0)
            .apply2_in_place(n, &mut buf2, &b, X - Y)
            .unwrap();
        assert_eq!(buf2, expected2);
    }

    #[test]
    fn test_small_inputs_stay_sequential() {
        let src = [1.0, 4.0, 9.0];
        let mut dst = [0.0; 3];
        Vectorizer::new()
            .parallel(true)
            .apply(3, &src, &mut dst, sqrt(X))
            .unwrap();
        assert_eq!(dst, [1.0, 2.0, 3.0]);
    }
}
