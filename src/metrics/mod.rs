//! Accuracy metrics between a true and a predicted trajectory.
//!
//! Per-sample metrics map one `(true, predicted)` pair to one value per
//! channel. Collection-level metrics reduce a whole per-sample score table.

pub mod agreement;
pub mod fourier;
pub mod gradient;
pub mod pointwise;
pub mod registry;
pub mod spread;

use thiserror::Error;

use crate::model::Shape;
use crate::model::scores::ScoreTable;
use crate::model::sequence::Sequence;

pub use registry::{Metric, MetricKind, select_metrics};

pub type ScoreVector = Vec<f64>;

pub type PerSampleFn = fn(&Sequence, &Sequence) -> Result<ScoreVector, MetricError>;

pub type TableReduceFn = fn(&ScoreTable) -> Result<ScoreVector, MetricError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateKind {
    #[error("sequence has no time steps")]
    EmptySequence,
    #[error("needs at least {required} time steps, got {actual}")]
    TooFewSteps { required: usize, actual: usize },
    #[error("collection has no samples")]
    NoSamples,
    #[error("score table has no rows")]
    EmptyTable,
    #[error("aggregation weights sum to zero")]
    ZeroWeightSum,
    #[error("weight at row {index} is negative or not finite")]
    InvalidWeight { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("shape mismatch: true is {true_shape:?}, predicted is {predicted_shape:?}")]
    ShapeMismatch {
        true_shape: Shape,
        predicted_shape: Shape,
    },
    #[error("degenerate input: {0}")]
    Degenerate(#[from] DegenerateKind),
}

pub(crate) fn check_pair(truth: &Sequence, pred: &Sequence) -> Result<(), MetricError> {
    if truth.shape() != pred.shape() {
        return Err(MetricError::ShapeMismatch {
            true_shape: truth.shape(),
            predicted_shape: pred.shape(),
        });
    }
    if truth.is_empty() {
        return Err(DegenerateKind::EmptySequence.into());
    }
    Ok(())
}

/// Applies `f` to each channel's `(true, predicted)` series, in channel order.
pub(crate) fn per_channel<F>(
    truth: &Sequence,
    pred: &Sequence,
    mut f: F,
) -> Result<ScoreVector, MetricError>
where
    F: FnMut(&[f64], &[f64]) -> f64,
{
    check_pair(truth, pred)?;
    let mut out = Vec::with_capacity(truth.channels());
    for c in 0..truth.channels() {
        let t = truth.channel(c);
        let p = pred.channel(c);
        out.push(f(&t, &p));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/mod.rs"]
mod tests;
