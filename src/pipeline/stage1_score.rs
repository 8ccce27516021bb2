use clap::ValueEnum;

use crate::metrics::{DegenerateKind, Metric, MetricError, MetricKind, PerSampleFn};
use crate::model::scores::ScoreTable;
use crate::model::sequence::Sequence;
use crate::pipeline::EvalError;

/// What to do when a metric needs more time steps than a sample has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DegeneratePolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Record a row of NaN for that sample and keep going.
    #[value(name = "nan")]
    NanSentinel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricScores {
    PerSample(ScoreTable),
    Collection(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMetric {
    pub name: &'static str,
    pub scores: MetricScores,
}

#[derive(Debug, Clone)]
pub struct Stage1Inputs<'a> {
    pub trues: &'a [Sequence],
    pub predicted: &'a [Sequence],
    pub registry: &'a [Metric],
    pub policy: DegeneratePolicy,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub channels: usize,
    pub metrics: Vec<ScoredMetric>,
}

pub fn run_stage1(inputs: &Stage1Inputs<'_>) -> Result<Stage1Output, EvalError> {
    let channels = validate_collection(inputs.trues, inputs.predicted)?;
    if inputs.trues.is_empty() {
        return Err(EvalError::Degenerate {
            context: "trajectory set".to_string(),
            kind: DegenerateKind::NoSamples,
        });
    }

    let mut metrics = Vec::with_capacity(inputs.registry.len());
    for metric in inputs.registry {
        let scores = match metric.kind {
            MetricKind::PerSample(f) => MetricScores::PerSample(score_on_sequence(
                metric.name,
                inputs.trues,
                inputs.predicted,
                f,
                inputs.policy,
            )?),
            MetricKind::CollectionLevel { basis, reduce } => {
                let table = score_on_sequence(
                    metric.name,
                    inputs.trues,
                    inputs.predicted,
                    basis,
                    inputs.policy,
                )?;
                let values = reduce(&table).map_err(|source| EvalError::Reduce {
                    metric: metric.name,
                    source,
                })?;
                MetricScores::Collection(values)
            }
        };
        tracing::debug!(metric = metric.name, "scored");
        metrics.push(ScoredMetric {
            name: metric.name,
            scores,
        });
    }

    Ok(Stage1Output { channels, metrics })
}

/// Applies `f` to every `(trues[i], predicted[i])` pair; row `i` of the
/// result belongs to sample `i`.
pub fn score_on_sequence(
    name: &'static str,
    trues: &[Sequence],
    predicted: &[Sequence],
    f: PerSampleFn,
    policy: DegeneratePolicy,
) -> Result<ScoreTable, EvalError> {
    let channels = validate_collection(trues, predicted)?;

    let mut rows = Vec::with_capacity(trues.len());
    let mut sentinels = 0usize;
    for (sample, (truth, pred)) in trues.iter().zip(predicted).enumerate() {
        match f(truth, pred) {
            Ok(row) => rows.push(row),
            Err(MetricError::Degenerate(DegenerateKind::TooFewSteps { .. }))
                if policy == DegeneratePolicy::NanSentinel =>
            {
                sentinels += 1;
                rows.push(vec![f64::NAN; channels]);
            }
            Err(source) => {
                return Err(EvalError::Metric {
                    metric: name,
                    sample,
                    source,
                });
            }
        }
    }
    if sentinels > 0 {
        tracing::warn!(
            metric = name,
            samples = sentinels,
            "too few time steps; recorded NaN"
        );
    }

    ScoreTable::from_rows(channels, rows).map_err(|source| EvalError::Table {
        metric: name,
        source,
    })
}

/// Checks pairing, per-sample shapes and the shared channel count.
/// Returns the channel count (0 for an empty collection).
pub fn validate_collection(trues: &[Sequence], predicted: &[Sequence]) -> Result<usize, EvalError> {
    if trues.len() != predicted.len() {
        return Err(EvalError::LengthMismatch {
            what: "predicted sequences".to_string(),
            expected: trues.len(),
            actual: predicted.len(),
        });
    }
    let channels = trues.first().map_or(0, Sequence::channels);
    for (sample, (truth, pred)) in trues.iter().zip(predicted).enumerate() {
        if truth.shape() != pred.shape() {
            return Err(EvalError::PairShape {
                sample,
                true_shape: truth.shape(),
                predicted_shape: pred.shape(),
            });
        }
        if truth.is_empty() {
            return Err(EvalError::Degenerate {
                context: format!("sample {sample}"),
                kind: DegenerateKind::EmptySequence,
            });
        }
        if truth.channels() != channels {
            return Err(EvalError::ChannelCount {
                sample,
                expected: channels,
                actual: truth.channels(),
            });
        }
    }
    Ok(channels)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_score.rs"]
mod tests;
