pub mod stage1_score;
pub mod stage2_aggregate;
pub mod stage3_report;

use thiserror::Error;

use crate::input::TrajectorySet;
use crate::metrics::{DegenerateKind, Metric, MetricError};
use crate::model::{Shape, ShapeError};
use crate::report::{Report, Summary};

use stage1_score::{DegeneratePolicy, Stage1Inputs, run_stage1, validate_collection};
use stage3_report::assemble_report;

/// The three failure classes a scoring run can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    ShapeMismatch,
    DegenerateInput,
    ConfigurationMismatch,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("metric `{metric}` failed on sample {sample}: {source}")]
    Metric {
        metric: &'static str,
        sample: usize,
        #[source]
        source: MetricError,
    },
    #[error("metric `{metric}`: {source}")]
    Reduce {
        metric: &'static str,
        #[source]
        source: MetricError,
    },
    #[error("sample {sample}: true is {true_shape:?} but predicted is {predicted_shape:?}")]
    PairShape {
        sample: usize,
        true_shape: Shape,
        predicted_shape: Shape,
    },
    #[error("sample {sample} has {actual} channels, expected {expected}")]
    ChannelCount {
        sample: usize,
        expected: usize,
        actual: usize,
    },
    #[error("score table of `{metric}`: {source}")]
    Table {
        metric: &'static str,
        #[source]
        source: ShapeError,
    },
    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
    #[error("degenerate input in {context}: {kind}")]
    Degenerate {
        context: String,
        kind: DegenerateKind,
    },
    #[error("{names} state names configured but trajectories have {channels} channels")]
    ConfigurationMismatch { names: usize, channels: usize },
}

impl EvalError {
    pub fn class(&self) -> ErrorClass {
        match self {
            EvalError::Metric { source, .. } | EvalError::Reduce { source, .. } => match source {
                MetricError::ShapeMismatch { .. } => ErrorClass::ShapeMismatch,
                MetricError::Degenerate(_) => ErrorClass::DegenerateInput,
            },
            EvalError::PairShape { .. }
            | EvalError::ChannelCount { .. }
            | EvalError::Table { .. }
            | EvalError::LengthMismatch { .. } => ErrorClass::ShapeMismatch,
            EvalError::Degenerate { .. } => ErrorClass::DegenerateInput,
            EvalError::ConfigurationMismatch { .. } => ErrorClass::ConfigurationMismatch,
        }
    }
}

/// Scores `set` with every metric in `registry` and rolls the result up
/// into the full report and the summary.
pub fn run_pipeline(
    set: &TrajectorySet,
    registry: &[Metric],
    state_names: &[String],
    policy: DegeneratePolicy,
) -> Result<(Report, Summary), EvalError> {
    // shape and emptiness problems outrank a state-name mismatch
    let channels = validate_collection(&set.trues, &set.predicted)?;
    if !set.trues.is_empty() && channels != state_names.len() {
        return Err(EvalError::ConfigurationMismatch {
            names: state_names.len(),
            channels,
        });
    }

    let stage1 = run_stage1(&Stage1Inputs {
        trues: &set.trues,
        predicted: &set.predicted,
        registry,
        policy,
    })?;

    tracing::info!(
        samples = set.len(),
        channels = stage1.channels,
        metrics = stage1.metrics.len(),
        "scored trajectories"
    );

    let steps = set.steps();
    assemble_report(&stage1.metrics, &steps, &set.file_names, state_names)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
