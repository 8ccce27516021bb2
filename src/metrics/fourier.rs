//! Amplitude-spectrum error over the time axis.
//!
//! The transform is a direct DFT. Twiddles come from one table of
//! `n` angles indexed by `(k * j) mod n`, and every bin sums in ascending
//! `j`, so the output does not depend on an FFT plan or backend.

use std::f64::consts::TAU;

use crate::metrics::{MetricError, ScoreVector, check_pair};
use crate::model::sequence::Sequence;
use crate::simd::mean_abs_diff_f64;

struct Twiddles {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl Twiddles {
    fn new(n: usize) -> Self {
        let mut cos = Vec::with_capacity(n);
        let mut sin = Vec::with_capacity(n);
        for j in 0..n {
            let (s, c) = (TAU * j as f64 / n as f64).sin_cos();
            cos.push(c);
            sin.push(s);
        }
        Self { cos, sin }
    }

    fn amplitude_spectrum(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut out = Vec::with_capacity(n);
        for k in 0..n {
            let mut re = 0f64;
            let mut im = 0f64;
            for (j, &v) in values.iter().enumerate() {
                let idx = (k * j) % n;
                re += v * self.cos[idx];
                im -= v * self.sin[idx];
            }
            out.push((re * re + im * im).sqrt());
        }
        out
    }
}

/// Per channel, mean over frequency bins of `| |DFT(t)| - |DFT(p)| |`.
pub fn fourier_amplitude_error(
    truth: &Sequence,
    pred: &Sequence,
) -> Result<ScoreVector, MetricError> {
    check_pair(truth, pred)?;
    let twiddles = Twiddles::new(truth.steps());
    let mut out = Vec::with_capacity(truth.channels());
    for c in 0..truth.channels() {
        let t = twiddles.amplitude_spectrum(&truth.channel(c));
        let p = twiddles.amplitude_spectrum(&pred.channel(c));
        out.push(mean_abs_diff_f64(&t, &p));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/fourier.rs"]
mod tests;
