use super::*;
use crate::simd::scalar;

// Nine elements: two full 256-bit chunks plus a scalar tail.
const A: [f64; 9] = [0.1, 2.0, 0.3, -4.0, 7.5, 1e-9, -1e9, 3.25, 0.5];
const B: [f64; 9] = [0.3, -2.0, 0.3, 4.0, 7.0, 0.0, 1e9, -3.25, 0.25];

#[test]
fn test_sum_equiv() {
    assert_eq!(sum_f64(&A).to_bits(), scalar::sum_f64(&A).to_bits());
}

#[test]
fn test_abs_diff_equiv() {
    assert_eq!(
        sum_abs_diff_f64(&A, &B).to_bits(),
        scalar::sum_abs_diff_f64(&A, &B).to_bits()
    );
}

#[test]
fn test_sq_diff_equiv() {
    assert_eq!(
        sum_sq_diff_f64(&A, &B).to_bits(),
        scalar::sum_sq_diff_f64(&A, &B).to_bits()
    );
}
