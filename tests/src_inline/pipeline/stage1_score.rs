use super::*;

use crate::metrics::gradient::{mean_absolute_gradient_error, mean_squared_gradient_error};
use crate::metrics::pointwise::mean_squared_error;
use crate::metrics::registry::default_registry;
use crate::metrics::select_metrics;

fn column(values: &[f64]) -> Sequence {
    Sequence::new(values.len(), 1, values.to_vec()).unwrap()
}

#[test]
fn test_rows_follow_sample_order() {
    let trues = vec![column(&[0.0, 0.0]), column(&[1.0]), column(&[2.0, 2.0, 2.0])];
    let predicted = vec![column(&[3.0, 3.0]), column(&[1.0]), column(&[0.0, 0.0, 0.0])];
    let table = score_on_sequence(
        "mse",
        &trues,
        &predicted,
        mean_squared_error,
        DegeneratePolicy::Fail,
    )
    .unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.to_rows(), vec![vec![9.0], vec![0.0], vec![4.0]]);
}

#[test]
fn test_channel_count_differs_between_samples() {
    let trues = vec![column(&[0.0, 1.0]), Sequence::new(2, 2, vec![0.0; 4]).unwrap()];
    let predicted = trues.clone();
    let err = validate_collection(&trues, &predicted).unwrap_err();
    assert_eq!(
        err,
        EvalError::ChannelCount {
            sample: 1,
            expected: 1,
            actual: 2
        }
    );
    assert_eq!(err.class(), crate::pipeline::ErrorClass::ShapeMismatch);
}

#[test]
fn test_pair_shape_mismatch() {
    let trues = vec![column(&[0.0, 1.0, 2.0])];
    let predicted = vec![column(&[0.0, 1.0])];
    assert_eq!(
        validate_collection(&trues, &predicted),
        Err(EvalError::PairShape {
            sample: 0,
            true_shape: (3, 1),
            predicted_shape: (2, 1),
        })
    );
}

#[test]
fn test_unpaired_collections() {
    let trues = vec![column(&[0.0]), column(&[1.0])];
    let predicted = vec![column(&[0.0])];
    assert!(matches!(
        validate_collection(&trues, &predicted),
        Err(EvalError::LengthMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn test_empty_sample_is_degenerate() {
    let empty = Sequence::new(0, 1, Vec::new()).unwrap();
    let err = validate_collection(&[empty.clone()], &[empty]).unwrap_err();
    assert!(matches!(
        err,
        EvalError::Degenerate {
            kind: DegenerateKind::EmptySequence,
            ..
        }
    ));
}

#[test]
fn test_no_samples_is_degenerate() {
    let registry = default_registry();
    let err = run_stage1(&Stage1Inputs {
        trues: &[],
        predicted: &[],
        registry: &registry,
        policy: DegeneratePolicy::Fail,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        EvalError::Degenerate {
            kind: DegenerateKind::NoSamples,
            ..
        }
    ));
}

#[test]
fn test_gradient_single_step_fails_by_default() {
    let trues = vec![column(&[1.0, 2.0]), column(&[1.0])];
    let predicted = vec![column(&[1.0, 3.0]), column(&[2.0])];
    for f in [mean_absolute_gradient_error, mean_squared_gradient_error] {
        let err = score_on_sequence("grad", &trues, &predicted, f, DegeneratePolicy::Fail)
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::Metric {
                metric: "grad",
                sample: 1,
                source: MetricError::Degenerate(DegenerateKind::TooFewSteps {
                    required: 2,
                    actual: 1
                }),
            }
        );
    }
}

#[test]
fn test_gradient_single_step_nan_sentinel() {
    let trues = vec![column(&[1.0, 2.0]), column(&[1.0])];
    let predicted = vec![column(&[1.0, 3.0]), column(&[2.0])];
    for f in [mean_absolute_gradient_error, mean_squared_gradient_error] {
        let table =
            score_on_sequence("grad", &trues, &predicted, f, DegeneratePolicy::NanSentinel)
                .unwrap();
        let rows = table.to_rows();
        assert_eq!(rows[0], vec![1.0]);
        assert!(rows[1][0].is_nan());
    }
}

#[test]
fn test_collection_metric_reduces_across_samples() {
    let trues = vec![column(&[0.0, 0.0]), column(&[0.0, 0.0])];
    let predicted = vec![column(&[0.0, 0.0]), column(&[2.0, 2.0])];
    let registry = select_metrics(&["rmse".to_string(), "rmse-std".to_string()]).unwrap();
    let out = run_stage1(&Stage1Inputs {
        trues: &trues,
        predicted: &predicted,
        registry: &registry,
        policy: DegeneratePolicy::Fail,
    })
    .unwrap();

    assert_eq!(out.channels, 1);
    assert_eq!(out.metrics.len(), 2);
    assert_eq!(out.metrics[0].name, "rmse");
    assert!(matches!(out.metrics[0].scores, MetricScores::PerSample(_)));
    assert_eq!(out.metrics[1].name, "rmse-std");
    // rmse rows are [0] and [2]; population std is 1
    assert_eq!(out.metrics[1].scores, MetricScores::Collection(vec![1.0]));
}

#[test]
fn test_policy_parses_from_cli_names() {
    assert_eq!(
        DegeneratePolicy::from_str("nan", false).unwrap(),
        DegeneratePolicy::NanSentinel
    );
    assert_eq!(
        DegeneratePolicy::from_str("fail", false).unwrap(),
        DegeneratePolicy::Fail
    );
    assert_eq!(DegeneratePolicy::default(), DegeneratePolicy::Fail);
}
