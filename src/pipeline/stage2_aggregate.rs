use crate::metrics::DegenerateKind;
use crate::model::scores::ScoreTable;
use crate::pipeline::EvalError;
use crate::pipeline::stage1_score::{MetricScores, ScoredMetric};

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateScore {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Step counts as aggregation weights.
pub fn step_weights(steps: &[usize]) -> Vec<f64> {
    steps.iter().map(|&s| s as f64).collect()
}

/// Weighted mean of the table's rows, per column.
///
/// Longer samples weigh more, so every predicted step contributes equally
/// rather than every sample. Rows are summed in order; NaN cells propagate
/// into their column. `context` names the table in errors.
pub fn aggregate(
    table: &ScoreTable,
    weights: &[f64],
    context: &str,
) -> Result<Vec<f64>, EvalError> {
    if weights.len() != table.n_rows() {
        return Err(EvalError::LengthMismatch {
            what: format!("{context} weights"),
            expected: table.n_rows(),
            actual: weights.len(),
        });
    }
    let mut total = 0f64;
    for (index, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(EvalError::Degenerate {
                context: context.to_string(),
                kind: DegenerateKind::InvalidWeight { index },
            });
        }
        total += w;
    }
    if total == 0.0 {
        return Err(EvalError::Degenerate {
            context: context.to_string(),
            kind: DegenerateKind::ZeroWeightSum,
        });
    }

    let mut out = Vec::with_capacity(table.channels());
    for c in 0..table.channels() {
        let mut acc = 0f64;
        for (row, &w) in table.rows().zip(weights) {
            acc += w * row[c];
        }
        out.push(acc / total);
    }
    Ok(out)
}

/// One aggregate per scored metric, in the same order. Collection-level
/// metrics are already one value per channel and pass through unchanged.
pub fn aggregate_all(
    metrics: &[ScoredMetric],
    steps: &[usize],
) -> Result<Vec<AggregateScore>, EvalError> {
    let weights = step_weights(steps);
    metrics
        .iter()
        .map(|m| {
            let values = match &m.scores {
                MetricScores::PerSample(table) => {
                    aggregate(table, &weights, &format!("aggregation of `{}`", m.name))?
                }
                MetricScores::Collection(values) => values.clone(),
            };
            Ok(AggregateScore {
                name: m.name,
                values,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
