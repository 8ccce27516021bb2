//! Summation kernels shared by the metric functions.
//!
//! Every backend accumulates in ascending index order into a single `f64`,
//! so results are bit-identical across scalar, AVX2 and NEON builds. SIMD
//! lanes only evaluate the element-wise differences.

#[inline]
pub fn sum_f64(values: &[f64]) -> f64 {
    backend::sum_f64(values)
}

/// `Σ |a[i] - b[i]|` over the common prefix of `a` and `b`.
#[inline]
pub fn sum_abs_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    backend::sum_abs_diff_f64(a, b)
}

/// `Σ (a[i] - b[i])²` over the common prefix of `a` and `b`.
#[inline]
pub fn sum_sq_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    backend::sum_sq_diff_f64(a, b)
}

#[inline]
pub fn mean_abs_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    sum_abs_diff_f64(a, b) / a.len() as f64
}

#[inline]
pub fn mean_sq_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    sum_sq_diff_f64(a, b) / a.len() as f64
}

#[inline]
pub fn backend_name() -> &'static str {
    backend::backend_name()
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
mod backend {
    pub use crate::simd::avx2::*;
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod backend {
    pub use crate::simd::neon::*;
}

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "avx2"),
    all(target_arch = "aarch64", target_feature = "neon"),
)))]
mod backend {
    pub use crate::simd::scalar::*;
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub mod avx2;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;
pub mod scalar;

#[cfg(test)]
#[path = "../../tests/src_inline/simd/mod.rs"]
mod tests;
