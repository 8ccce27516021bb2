use crate::metrics::{MetricError, ScoreVector, per_channel};
use crate::model::sequence::Sequence;
use crate::simd::{mean_abs_diff_f64, mean_sq_diff_f64};

pub fn mean_squared_error(truth: &Sequence, pred: &Sequence) -> Result<ScoreVector, MetricError> {
    per_channel(truth, pred, mean_sq_diff_f64)
}

pub fn root_mean_squared_error(
    truth: &Sequence,
    pred: &Sequence,
) -> Result<ScoreVector, MetricError> {
    per_channel(truth, pred, |t, p| mean_sq_diff_f64(t, p).sqrt())
}

pub fn mean_absolute_error(truth: &Sequence, pred: &Sequence) -> Result<ScoreVector, MetricError> {
    per_channel(truth, pred, mean_abs_diff_f64)
}
