use super::*;
use approx::assert_relative_eq;

fn column(values: &[f64]) -> Sequence {
    Sequence::new(values.len(), 1, values.to_vec()).unwrap()
}

#[test]
fn test_first_difference() {
    assert_eq!(first_difference(&[1.0, 4.0, 2.0]), vec![3.0, -2.0]);
    assert!(first_difference(&[1.0]).is_empty());
}

#[test]
fn test_gradient_errors() {
    // Δt = [1, 1, 1], Δp = [2, 0, 1]
    let t = column(&[0.0, 1.0, 2.0, 3.0]);
    let p = column(&[0.0, 2.0, 2.0, 3.0]);
    assert_relative_eq!(mean_absolute_gradient_error(&t, &p).unwrap()[0], 2.0 / 3.0);
    assert_relative_eq!(mean_squared_gradient_error(&t, &p).unwrap()[0], 2.0 / 3.0);
}

#[test]
fn test_offset_prediction_has_zero_gradient_error() {
    let t = column(&[0.0, 1.5, -2.0, 4.0]);
    let p = column(&[10.0, 11.5, 8.0, 14.0]);
    assert_eq!(mean_absolute_gradient_error(&t, &p).unwrap(), vec![0.0]);
    assert_eq!(mean_squared_gradient_error(&t, &p).unwrap(), vec![0.0]);
}

#[test]
fn test_single_step_is_degenerate_for_both() {
    let t = column(&[1.0]);
    let p = column(&[2.0]);
    let expected = Err(MetricError::Degenerate(DegenerateKind::TooFewSteps {
        required: 2,
        actual: 1,
    }));
    assert_eq!(mean_absolute_gradient_error(&t, &p), expected);
    assert_eq!(mean_squared_gradient_error(&t, &p), expected);
}
