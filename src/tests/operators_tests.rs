use crate::{X, abs, apply, max, min, sqrt};
use approx::{assert_relative_eq, assert_ulps_eq};

/// 65 values: sixteen full batches plus a one-element tail, some negative.
fn inputs() -> Vec<f32> {
    (0..65).map(|i| 50.0 * (i as f32 - 20.0)).collect()
}

fn run<E: crate::OneInput>(expr: crate::Expr<E>) -> (Vec<f32>, Vec<f32>) {
    let inputs = inputs();
    let mut actual = vec![0.0; inputs.len()];
    apply(inputs.len(), &inputs, &mut actual, expr).expect("buffers are sized");
    (inputs, actual)
}

#[test]
fn test_add() {
    let (inputs, actual) = run(X + 4.0);
    for (i, (&x, &got)) in inputs.iter().zip(&actual).enumerate() {
        assert_ulps_eq!(got, x + 4.0, max_ulps = 4);
        assert!(got.is_finite(), "index={i}, input={x}");
    }
}

#[test]
fn test_sub() {
    let (inputs, actual) = run(X - 4.0);
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_ulps_eq!(got, x - 4.0, max_ulps = 4);
    }
}

#[test]
fn test_sub_literal_on_left() {
    let (inputs, actual) = run(4.0 - X);
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_ulps_eq!(got, 4.0 - x, max_ulps = 4);
    }
}

#[test]
fn test_mul() {
    let (inputs, actual) = run(X * 4.0);
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_ulps_eq!(got, x * 4.0, max_ulps = 4);
    }
}

#[test]
fn test_max() {
    let (inputs, actual) = run(max(X, 100.0));
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_eq!(got, if x > 100.0 { x } else { 100.0 });
    }
}

#[test]
fn test_min() {
    let (inputs, actual) = run(min(X, 100.0));
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_eq!(got, if x < 100.0 { x } else { 100.0 });
    }
}

#[test]
fn test_abs() {
    let (inputs, actual) = run(abs(X));
    for (&x, &got) in inputs.iter().zip(&actual) {
        assert_eq!(got, x.abs());
        assert!(got.is_sign_positive());
    }
}

/// Negative inputs come back as NaN, the rest as their square root.
#[test]
fn test_sqrt_mixed_sign() {
    let (inputs, actual) = run(sqrt(X));
    let mut nan_count = 0;
    for (i, (&x, &got)) in inputs.iter().zip(&actual).enumerate() {
        if x < 0.0 {
            assert!(got.is_nan(), "index={i}, input={x}, got={got}");
            nan_count += 1;
        } else {
            assert_relative_eq!(got, x.sqrt(), max_relative = 1e-6);
        }
    }
    assert_eq!(nan_count, 20);
}

#[test]
fn test_nan_policy_same_in_batch_and_tail() {
    // Lanes 0..4 are a batch, lane 4 is the tail; NaN sits in both.
    let src = [f32::NAN, 1.0, f32::NAN, -7.0, f32::NAN];
    let mut hi = [0.0; 5];
    let mut lo = [0.0; 5];
    apply(5, &src, &mut hi, max(X, 2.0)).unwrap();
    apply(5, &src, &mut lo, min(2.0_f32, X)).unwrap();
    assert_eq!(hi, [2.0, 2.0, 2.0, 2.0, 2.0]);
    assert_eq!(lo, [2.0, 1.0, 2.0, -7.0, 2.0]);
}

#[test]
fn test_abs_preserves_nan_payload_in_tail() {
    let payload = f32::from_bits(0xFFC0_1234);
    let src = [-1.0, -2.0, -3.0, -4.0, payload];
    let mut dst = [0.0; 5];
    apply(5, &src, &mut dst, abs(X)).unwrap();
    assert_eq!(dst[..4], [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(dst[4].to_bits(), 0x7FC0_1234);
}

#[test]
fn test_zero_and_short_lengths() {
    let src = [9.0, 16.0, 25.0];
    let mut dst = [-1.0; 3];
    apply(0, &src, &mut dst, sqrt(X)).unwrap();
    assert_eq!(dst, [-1.0; 3]);

    apply(3, &src, &mut dst, sqrt(X)).unwrap();
    assert_eq!(dst, [3.0, 4.0, 5.0]);
}
