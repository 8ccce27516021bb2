#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

pub fn sum_f64(values: &[f64]) -> f64 {
    let mut sum = 0f64;
    let mut i = 0usize;
    let n = values.len();
    unsafe {
        while i + 2 <= n {
            let v = vld1q_f64(values.as_ptr().add(i));
            let mut lanes = [0f64; 2];
            vst1q_f64(lanes.as_mut_ptr(), v);
            for lane in &lanes {
                sum += *lane;
            }
            i += 2;
        }
    }
    while i < n {
        sum += values[i];
        i += 1;
    }
    sum
}

pub fn sum_abs_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let mut sum = 0f64;
    let mut i = 0usize;
    unsafe {
        while i + 2 <= n {
            let va = vld1q_f64(a.as_ptr().add(i));
            let vb = vld1q_f64(b.as_ptr().add(i));
            let d = vabsq_f64(vsubq_f64(va, vb));
            let mut lanes = [0f64; 2];
            vst1q_f64(lanes.as_mut_ptr(), d);
            for lane in &lanes {
                sum += *lane;
            }
            i += 2;
        }
    }
    while i < n {
        sum += (a[i] - b[i]).abs();
        i += 1;
    }
    sum
}

pub fn sum_sq_diff_f64(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let mut sum = 0f64;
    let mut i = 0usize;
    unsafe {
        while i + 2 <= n {
            let va = vld1q_f64(a.as_ptr().add(i));
            let vb = vld1q_f64(b.as_ptr().add(i));
            let d = vsubq_f64(va, vb);
            let sq = vmulq_f64(d, d);
            let mut lanes = [0f64; 2];
            vst1q_f64(lanes.as_mut_ptr(), sq);
            for lane in &lanes {
                sum += *lane;
            }
            i += 2;
        }
    }
    while i < n {
        let d = a[i] - b[i];
        sum += d * d;
        i += 1;
    }
    sum
}

pub fn backend_name() -> &'static str {
    "neon"
}

#[cfg(test)]
#[path = "../../tests/src_inline/simd/neon.rs"]
mod tests;
