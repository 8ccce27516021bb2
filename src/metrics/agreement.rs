use crate::metrics::{MetricError, ScoreVector, per_channel};
use crate::model::sequence::Sequence;
use crate::simd::{sum_abs_diff_f64, sum_f64};

/// Willmott's index of agreement d1, per channel.
///
/// `1 - Σ|t - p| / Σ(|p - mean(t)| + |t - mean(t)|)`. When the denominator
/// is exactly zero (constant truth matched exactly) the result is 1.0.
pub fn index_of_agreement(truth: &Sequence, pred: &Sequence) -> Result<ScoreVector, MetricError> {
    per_channel(truth, pred, d1)
}

fn d1(t: &[f64], p: &[f64]) -> f64 {
    let mean = sum_f64(t) / t.len() as f64;
    let numerator = sum_abs_diff_f64(t, p);
    let mut denominator = 0f64;
    for (&tv, &pv) in t.iter().zip(p) {
        denominator += (pv - mean).abs() + (tv - mean).abs();
    }
    if denominator == 0.0 {
        return 1.0;
    }
    1.0 - numerator / denominator
}
