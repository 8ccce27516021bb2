use super::*;
use approx::assert_abs_diff_eq;

fn amplitude_spectrum(values: &[f64]) -> Vec<f64> {
    Twiddles::new(values.len()).amplitude_spectrum(values)
}

#[test]
fn test_spectrum_of_constant() {
    let spec = amplitude_spectrum(&[2.0, 2.0, 2.0, 2.0]);
    assert_abs_diff_eq!(spec[0], 8.0, epsilon = 1e-12);
    for v in &spec[1..] {
        assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_spectrum_of_alternating() {
    let spec = amplitude_spectrum(&[1.0, -1.0, 1.0, -1.0]);
    assert_abs_diff_eq!(spec[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(spec[2], 4.0, epsilon = 1e-12);
}

#[test]
fn test_circular_shift_has_zero_amplitude_error() {
    let t = Sequence::new(5, 1, vec![0.5, 1.0, -2.0, 3.0, 0.0]).unwrap();
    let p = Sequence::new(5, 1, vec![0.0, 0.5, 1.0, -2.0, 3.0]).unwrap();
    let err = fourier_amplitude_error(&t, &p).unwrap();
    assert_abs_diff_eq!(err[0], 0.0, epsilon = 1e-9);
}

#[test]
fn test_channels_are_independent() {
    let t = Sequence::new(3, 2, vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0]).unwrap();
    let p = Sequence::new(3, 2, vec![1.0, 1.0, 2.0, 1.0, 3.0, 1.0]).unwrap();
    let err = fourier_amplitude_error(&t, &p).unwrap();
    assert_eq!(err[0], 0.0);
    // DC bin of the second channel is 3, other bins are 0: mean = 1.
    assert_abs_diff_eq!(err[1], 1.0, epsilon = 1e-12);
}

#[test]
fn test_single_step() {
    let t = Sequence::new(1, 1, vec![2.0]).unwrap();
    let p = Sequence::new(1, 1, vec![-3.0]).unwrap();
    assert_eq!(fourier_amplitude_error(&t, &p).unwrap(), vec![1.0]);
}
