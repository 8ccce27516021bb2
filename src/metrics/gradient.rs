use crate::metrics::{DegenerateKind, MetricError, ScoreVector, check_pair, per_channel};
use crate::model::sequence::Sequence;
use crate::simd::{mean_abs_diff_f64, mean_sq_diff_f64};

/// Mean absolute error between the first differences of truth and prediction.
pub fn mean_absolute_gradient_error(
    truth: &Sequence,
    pred: &Sequence,
) -> Result<ScoreVector, MetricError> {
    gradient_error(truth, pred, mean_abs_diff_f64)
}

/// Mean squared error between the first differences of truth and prediction.
pub fn mean_squared_gradient_error(
    truth: &Sequence,
    pred: &Sequence,
) -> Result<ScoreVector, MetricError> {
    gradient_error(truth, pred, mean_sq_diff_f64)
}

fn gradient_error(
    truth: &Sequence,
    pred: &Sequence,
    reduce: fn(&[f64], &[f64]) -> f64,
) -> Result<ScoreVector, MetricError> {
    check_pair(truth, pred)?;
    if truth.steps() < 2 {
        return Err(DegenerateKind::TooFewSteps {
            required: 2,
            actual: truth.steps(),
        }
        .into());
    }
    per_channel(truth, pred, |t, p| {
        reduce(&first_difference(t), &first_difference(p))
    })
}

pub fn first_difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/gradient.rs"]
mod tests;
